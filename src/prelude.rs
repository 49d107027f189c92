// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use template_bundler::prelude::*;` to get started quickly.

pub use crate::cache::{CacheEntry, TemplateCache};
pub use crate::config::{BundleFailurePolicy, BundlerConfig};
pub use crate::coordinator::{BundleResponse, Coordinator, DeferredRegistry, Phase};
pub use crate::error::{BuildError, BundlerError, FetchError};
pub use crate::fetch::{
    CachingFetcher, HttpTransport, TemplateFetcher, Transport, TransportResponse,
};
pub use crate::template::{Envelope, Placeholder, ResponseMeta, Resolver, TemplateResult};
