use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

/// Worker pool and queue sizing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineSettings {
    /// Number of concurrent fetch workers. Signed so that bad values reach
    /// validation instead of failing deserialization with a vague message.
    #[serde(default = "default_parallel")]
    pub parallel: i64,
    /// Capacity of both the work queue and the results queue
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_parallel() -> i64 {
    10
}

fn default_channel_capacity() -> usize {
    1
}

/// HTTP transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Proxy URI applied to every request
    pub proxy: Option<String>,
    /// Connection establishment timeout; unset means the client default
    pub connect_timeout_ms: Option<u64>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            proxy: None,
            connect_timeout_ms: None,
        }
    }
}

fn default_user_agent() -> String {
    "fetchpool/0.1.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.pipeline.parallel, 10);
        assert_eq!(config.pipeline.channel_capacity, 1);
        assert_eq!(config.http.user_agent, "fetchpool/0.1.0");
        assert!(config.http.proxy.is_none());
        assert!(config.http.connect_timeout_ms.is_none());
    }
}
