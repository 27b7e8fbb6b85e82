//! Fetch and digest a single identifier

use super::Transport;
use crate::digest;
use crate::record::ResultRecord;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fetch `url` and hash its body. Every failure becomes a
/// [`ResultRecord::Failure`]; nothing is returned as an error.
pub async fn fetch_and_digest(transport: &dyn Transport, url: String) -> ResultRecord {
    match transport.get(&url).await {
        Ok(body) => {
            let hex = digest::md5_hex(&body);
            debug!(url = %url, size = body.len(), digest = %hex, "Fetched");
            ResultRecord::Digest { url, hex }
        }
        Err(err) => {
            info!(url = %url, error = %err, "Fetch failed");
            ResultRecord::from(err)
        }
    }
}

/// Run [`fetch_and_digest`] on its own task so a panicking transport still
/// yields a [`ResultRecord::Failure`] for `url` instead of losing it.
pub async fn fetch_isolated(transport: Arc<dyn Transport>, url: String) -> ResultRecord {
    let task_url = url.clone();
    let handle =
        tokio::spawn(async move { fetch_and_digest(transport.as_ref(), task_url).await });

    match handle.await {
        Ok(record) => record,
        Err(err) => {
            let reason = if err.is_panic() {
                panic_message(err.into_panic())
            } else {
                "task cancelled".to_string()
            };
            error!(url = %url, reason = %reason, "Fetch task aborted");
            ResultRecord::Failure(format!("fetch: {url} aborted: {reason}"))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic".to_string()
    }
}
