// ABOUTME: Defines the Transport trait - the abstraction over the network that
// ABOUTME: lets templates and bundles be fetched over HTTP or from a test double.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::template::ResponseMeta;

/// A successful response from a [`Transport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers, lowercased names.
    pub headers: BTreeMap<String, String>,

    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Create a 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// The transport metadata of this response, without the body.
    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            status: self.status,
            headers: self.headers.clone(),
        }
    }
}

/// Trait for fetching a URL.
///
/// Implementations return `Err` for transport failures and non-success statuses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the resource at `url`.
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError>;
}
