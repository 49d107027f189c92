// ABOUTME: The aggregate template document as received over the wire.
// ABOUTME: A JSON object mapping template key to raw template text.

use serde_json::Value;

use crate::error::FetchError;
use crate::fetch::TransportResponse;
use crate::template::ResponseMeta;

/// A fetched bundle: every template it carries plus the shared response metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleResponse {
    /// Status and headers of the bundle response.
    pub meta: ResponseMeta,

    /// Template key to content, in document order.
    pub templates: Vec<(String, String)>,
}

impl BundleResponse {
    /// Parse a transport response into a bundle.
    pub fn parse(response: &TransportResponse) -> Result<Self, FetchError> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::BundleUnavailable(format!("malformed bundle: {}", e)))?;

        let mut templates = Vec::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(content) => templates.push((key, content)),
                other => {
                    return Err(FetchError::BundleUnavailable(format!(
                        "malformed bundle: template '{}' is {}, not a string",
                        key, other
                    )));
                }
            }
        }

        Ok(Self {
            meta: response.meta(),
            templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundle() {
        let response = TransportResponse::ok(r#"{"b.html":"<p>B</p>","a.html":"<p>A</p>"}"#)
            .header("Content-Type", "application/json");

        let bundle = BundleResponse::parse(&response).unwrap();
        assert_eq!(bundle.meta.status, 200);
        assert_eq!(bundle.meta.headers["content-type"], "application/json");

        let keys: Vec<_> = bundle.templates.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b.html", "a.html"]);
        assert_eq!(bundle.templates[0].1, "<p>B</p>");
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        let response = TransportResponse::ok(r#"{"a.html": 42}"#);
        assert!(matches!(
            BundleResponse::parse(&response),
            Err(FetchError::BundleUnavailable(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let response = TransportResponse::ok("[]");
        assert!(BundleResponse::parse(&response).is_err());
    }
}
