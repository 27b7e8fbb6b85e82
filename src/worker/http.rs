//! HTTP transport backed by reqwest

use super::{Transport, TransportError};
use crate::config::HttpSettings;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Proxy};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// HTTP GET transport. Status codes are not inspected.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder()
            .user_agent(&settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ms) = settings.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }

        if let Some(ref url) = settings.proxy {
            let proxy = Proxy::all(url.as_str())
                .map_err(|e| ClientBuildError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ClientBuildError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        debug!(url, "Starting request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url, status = status.as_u16(), size = bytes.len(), "Body read");

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_defaults() {
        assert!(HttpTransport::new(&HttpSettings::default()).is_ok());
    }

    #[test]
    fn test_builds_with_proxy_and_timeout() {
        let settings = HttpSettings {
            proxy: Some("http://proxy.internal:3128".to_string()),
            connect_timeout_ms: Some(500),
            ..HttpSettings::default()
        };
        assert!(HttpTransport::new(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_url_is_request_error() {
        let transport = HttpTransport::new(&HttpSettings::default()).unwrap();

        let err = transport.get("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::Request { .. }));
        assert!(err.to_string().contains("not a url"));
    }
}
