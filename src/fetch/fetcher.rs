// ABOUTME: Defines the TemplateFetcher trait and CachingFetcher, which consults
// ABOUTME: the template cache before going to the network and stores what it fetches.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::Transport;
use crate::cache::{CacheEntry, TemplateCache};
use crate::error::FetchError;
use crate::template::{Envelope, TemplateResult};

/// Trait for fetching a template by key.
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// Fetch the template named `key`.
    ///
    /// With `ignore_fetch_error` set, failures are returned quietly as they
    /// occurred. Otherwise they are reported and surfaced as
    /// [`FetchError::TemplateLoad`].
    async fn fetch(&self, key: &str, ignore_fetch_error: bool) -> TemplateResult;
}

/// The default template fetcher: cache first, network second.
///
/// - A resolved cache entry is returned without I/O.
/// - A pending entry is awaited. Its content is then stored, or on failure
///   the entry is evicted so a later request can try again.
/// - Otherwise the template is fetched and the content stored.
///   Failures are never cached.
pub struct CachingFetcher {
    cache: TemplateCache,
    transport: Arc<dyn Transport>,
}

impl CachingFetcher {
    /// Create a fetcher over a shared cache and transport.
    pub fn new(cache: TemplateCache, transport: Arc<dyn Transport>) -> Self {
        Self { cache, transport }
    }

    /// The cache this fetcher reads and populates.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    async fn load(&self, key: &str) -> TemplateResult {
        debug!(key, "fetching template");
        let response = self.transport.get(key).await?;
        let envelope = Envelope::with_meta(response.body.clone(), response.meta());
        self.cache.put(key, envelope.clone()).await;
        Ok(envelope)
    }

    async fn settle(&self, key: &str, result: TemplateResult) -> TemplateResult {
        match &result {
            Ok(envelope) => {
                self.cache.put(key, envelope.clone()).await;
            }
            Err(_) => {
                self.cache.evict_pending(key).await;
            }
        }
        result
    }

    fn surface(&self, key: &str, err: FetchError, ignore_fetch_error: bool) -> FetchError {
        if ignore_fetch_error {
            debug!(key, error = %err, "template fetch failed, ignored by caller");
            return err;
        }

        error!(key, error = %err, "failed to load template");
        match err {
            FetchError::TemplateLoad { .. } => err,
            other => FetchError::TemplateLoad {
                key: key.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl TemplateFetcher for CachingFetcher {
    async fn fetch(&self, key: &str, ignore_fetch_error: bool) -> TemplateResult {
        let result = match self.cache.get(key).await {
            Some(CacheEntry::Resolved(envelope)) => return Ok(envelope),
            Some(CacheEntry::Pending(placeholder)) => {
                let outcome = placeholder.wait().await;
                self.settle(key, outcome).await
            }
            None => self.load(key).await,
        };

        result.map_err(|err| self.surface(key, err, ignore_fetch_error))
    }
}
