//! Configuration management for fetchpool
//!
//! Settings are layered from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//! 4. Command line flags (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use fetchpool::config::{Config, Overrides};
//!
//! let config = Config::load(&Overrides::default()).expect("Failed to load configuration");
//! println!("Workers: {}", config.pipeline.parallel);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `FETCHPOOL__<section>__<key>`:
//! - `FETCHPOOL__PIPELINE__PARALLEL=32`
//! - `FETCHPOOL__HTTP__PROXY=http://proxy:3128`
//!
//! # Configuration File
//!
//! By default the file is read from `config/fetchpool.toml`.
//! This can be overridden using the `FETCHPOOL_CONFIG` environment variable.
//! A missing file is not an error.

mod models;
mod sources;
mod validation;

pub use models::{Config, HttpSettings, PipelineSettings};
pub use sources::Overrides;
pub use validation::ValidationError;

use crate::pipeline::PipelineOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file or an environment value is malformed
    /// - Validation fails (non-positive parallelism, bad proxy, etc.)
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let config = sources::load(overrides)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(
        path: std::path::PathBuf,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path, overrides)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Pipeline sizing derived from the `[pipeline]` section
    pub fn pipeline_options(&self) -> Result<PipelineOptions, ValidationError> {
        validation::pipeline_options(&self.pipeline)
    }
}
