// ABOUTME: HTTP transport for templates and bundles.
// ABOUTME: Resolves relative template keys against an optional base URL.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{Transport, TransportResponse};
use crate::error::FetchError;

/// HTTP transport built on reqwest.
pub struct HttpTransport {
    base_url: Option<reqwest::Url>,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport that only accepts absolute URLs.
    pub fn new() -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(format!("template-bundler/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: None,
            http_client,
        })
    }

    /// Create a transport resolving relative keys against `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut transport = Self::new()?;
        transport.base_url = Some(parsed);
        Ok(transport)
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: Option<reqwest::Url>) -> Self {
        Self {
            base_url,
            http_client: client,
        }
    }

    /// Resolve a key or URL to an absolute URL.
    pub fn resolve(&self, url: &str) -> Result<reqwest::Url, FetchError> {
        // join() keeps absolute URLs as they are
        let resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => reqwest::Url::parse(url),
        };
        resolved.map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let resolved = self.resolve(url)?;

        let response = self.http_client.get(resolved.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: resolved.to_string(),
                status: status.as_u16(),
            });
        }

        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}
