//! One output line per fetched identifier

use crate::worker::TransportError;
use std::fmt;

/// Outcome of fetching a single identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRecord {
    /// Body fetched and hashed
    Digest { url: String, hex: String },
    /// Transport or body-read failure, already rendered for display
    Failure(String),
}

impl ResultRecord {
    pub fn is_success(&self) -> bool {
        matches!(self, ResultRecord::Digest { .. })
    }
}

impl From<TransportError> for ResultRecord {
    fn from(err: TransportError) -> Self {
        ResultRecord::Failure(err.to_string())
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultRecord::Digest { url, hex } => write!(f, "{url}\t{hex}"),
            ResultRecord::Failure(message) => f.write_str(message),
        }
    }
}
