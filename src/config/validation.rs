use super::models::{Config, PipelineSettings};
use crate::pipeline::{Parallelism, PipelineOptions};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("parallel must be at least 1, got {value}")]
    NonPositiveParallelism { value: i64 },

    #[error("channel_capacity must be at least 1")]
    ZeroChannelCapacity,

    #[error("http.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("Invalid proxy URL '{uri}': {reason}")]
    InvalidProxy { uri: String, reason: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_pipeline(config)?;
    validate_http(config)?;
    Ok(())
}

fn validate_pipeline(config: &Config) -> Result<(), ValidationError> {
    pipeline_options(&config.pipeline).map(|_| ())
}

/// Build pipeline sizing from the `[pipeline]` section, rejecting values
/// the pipeline cannot run with
pub fn pipeline_options(settings: &PipelineSettings) -> Result<PipelineOptions, ValidationError> {
    let parallelism = Parallelism::try_from(settings.parallel)?;
    let channel_capacity =
        NonZeroUsize::new(settings.channel_capacity).ok_or(ValidationError::ZeroChannelCapacity)?;

    Ok(PipelineOptions {
        parallelism,
        channel_capacity,
    })
}

fn validate_http(config: &Config) -> Result<(), ValidationError> {
    if config.http.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    if let Some(ref uri) = config.http.proxy {
        reqwest::Url::parse(uri).map_err(|e| ValidationError::InvalidProxy {
            uri: uri.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}
