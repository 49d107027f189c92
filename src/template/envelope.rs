// ABOUTME: Defines Envelope - template content plus optional transport metadata.
// ABOUTME: The shape every template request resolves to, whichever path served it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Outcome of a template request.
pub type TemplateResult = Result<Envelope, FetchError>;

/// Transport metadata of the response a template arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,

    /// Response headers, lowercased names.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Template content as handed to callers.
///
/// Templates served by a direct fetch carry that response's metadata.
/// Templates delivered by the bundle to a waiting caller carry the bundle
/// response's metadata. Content written straight into the cache has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Raw template body.
    pub data: String,

    /// Metadata of the response that carried the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl Envelope {
    /// Create an envelope holding bare content.
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            meta: None,
        }
    }

    /// Create an envelope holding content and the metadata of its response.
    pub fn with_meta(data: impl Into<String>, meta: ResponseMeta) -> Self {
        Self {
            data: data.into(),
            meta: Some(meta),
        }
    }

    /// Status code of the carrying response, if known.
    pub fn status(&self) -> Option<u16> {
        self.meta.as_ref().map(|m| m.status)
    }
}
