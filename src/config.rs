// ABOUTME: Runtime configuration for the template bundler.
// ABOUTME: Holds the bundle URL and the policy applied when the bundle cannot serve a template.

use serde::{Deserialize, Serialize};

/// Default location of the aggregate template document.
pub const DEFAULT_BUNDLE_URL: &str = "templates.json";

/// Environment variable that overrides the bundle URL in [`BundlerConfig::from_env`].
pub const BUNDLE_URL_ENV: &str = "TEMPLATE_BUNDLE_URL";

/// What happens to templates that were parked waiting for the bundle but
/// that the bundle did not deliver (bundle fetch failed, or key missing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleFailurePolicy {
    /// Fetch each outstanding template individually.
    #[default]
    FallBack,
    /// Fail each outstanding template with the bundle error.
    Reject,
}

/// Configuration for a [`crate::coordinator::Coordinator`].
///
/// Moved into the coordinator when it is built; there is no reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    /// URL of the bundle document.
    pub bundle_url: String,

    /// Handling of templates the bundle did not resolve.
    pub on_bundle_failure: BundleFailurePolicy,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            bundle_url: DEFAULT_BUNDLE_URL.to_string(),
            on_bundle_failure: BundleFailurePolicy::default(),
        }
    }
}

impl BundlerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BUNDLE_URL_ENV) {
            if !url.trim().is_empty() {
                config.bundle_url = url;
            }
        }
        config
    }

    /// Set the bundle URL.
    pub fn with_bundle_url(mut self, url: impl Into<String>) -> Self {
        self.bundle_url = url.into();
        self
    }

    /// Set the policy for templates the bundle did not resolve.
    pub fn with_failure_policy(mut self, policy: BundleFailurePolicy) -> Self {
        self.on_bundle_failure = policy;
        self
    }
}
