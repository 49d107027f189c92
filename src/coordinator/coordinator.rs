// ABOUTME: Phase coordinator for template requests.
// ABOUTME: Serves the first templates directly, then parks the rest until one bundle fetch delivers them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::join_all;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use super::{BundleResponse, DeferredRegistry, Phase};
use crate::cache::TemplateCache;
use crate::config::{BundleFailurePolicy, BundlerConfig};
use crate::error::FetchError;
use crate::fetch::{CachingFetcher, TemplateFetcher, Transport};
use crate::template::{Envelope, Resolver, TemplateResult};

/// Phase-based template request coordinator.
///
/// Wraps a [`TemplateFetcher`] without changing its contract: callers get the
/// same results and errors, only the number of network round-trips changes.
///
/// # Phases
///
/// - **Initial:** requests go straight to the fetcher. When the first one
///   settles, successfully or not, the bundle fetch starts.
/// - **Aggregating:** each requested key not yet cached gets a placeholder in
///   the cache, which the fetcher then waits on instead of going to the network.
/// - **Satisfied:** requests pass straight through to the fetcher.
///
/// The bundle is fetched at most once per coordinator. Placeholders the bundle
/// does not resolve are settled according to [`BundleFailurePolicy`].
///
/// Clones share the same state.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    config: BundlerConfig,
    cache: TemplateCache,
    fetcher: Arc<dyn TemplateFetcher>,
    transport: Arc<dyn Transport>,
    deferreds: DeferredRegistry,
    /// Held while dispatching in `Aggregating` and while applying the bundle,
    /// so no placeholder is installed after the bundle has been applied.
    phase: Mutex<Phase>,
    phase_tx: watch::Sender<Phase>,
    aggregate_started: AtomicBool,
}

impl Coordinator {
    /// Create a coordinator fetching templates through a [`CachingFetcher`]
    /// over `cache` and `transport`.
    pub fn new(config: BundlerConfig, cache: TemplateCache, transport: Arc<dyn Transport>) -> Self {
        let fetcher = Arc::new(CachingFetcher::new(cache.clone(), transport.clone()));
        Self::with_fetcher(config, cache, fetcher, transport)
    }

    /// Create a coordinator around a custom fetcher.
    ///
    /// `fetcher` must consult `cache` before going to the network, otherwise
    /// placeholders installed during aggregation are never observed.
    pub fn with_fetcher(
        config: BundlerConfig,
        cache: TemplateCache,
        fetcher: Arc<dyn TemplateFetcher>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Initial);

        Self {
            inner: Arc::new(Inner {
                config,
                cache,
                fetcher,
                transport,
                deferreds: DeferredRegistry::new(),
                phase: Mutex::new(Phase::Initial),
                phase_tx,
                aggregate_started: AtomicBool::new(false),
            }),
        }
    }

    /// Request a template.
    ///
    /// # Arguments
    ///
    /// * `key` - The template key (path or URL).
    /// * `ignore_fetch_error` - Passed through to the fetcher; suppresses error reporting.
    pub async fn request(&self, key: &str, ignore_fetch_error: bool) -> TemplateResult {
        let phase = self.inner.phase.lock().await;
        let current = *phase;

        match current {
            Phase::Initial => {
                drop(phase);
                self.initial_request(key, ignore_fetch_error).await
            }
            Phase::Aggregating => {
                self.inner.promise_template(key).await;
                drop(phase);
                self.inner.fetcher.fetch(key, ignore_fetch_error).await
            }
            Phase::Satisfied => {
                drop(phase);
                self.inner.fetcher.fetch(key, ignore_fetch_error).await
            }
        }
    }

    /// The current phase.
    pub async fn phase(&self) -> Phase {
        *self.inner.phase.lock().await
    }

    /// Subscribe to phase transitions.
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.inner.phase_tx.subscribe()
    }

    /// Wait until the phase has reached at least `target`.
    pub async fn wait_for_phase(&self, target: Phase) -> Phase {
        let mut rx = self.subscribe_phase();
        // the sender lives in `inner`, so this only fails if it was dropped
        let _ = rx.wait_for(|phase| *phase >= target).await;
        *rx.borrow()
    }

    /// The template cache this coordinator writes to.
    pub fn cache(&self) -> &TemplateCache {
        &self.inner.cache
    }

    /// The configuration this coordinator was built with.
    pub fn config(&self) -> &BundlerConfig {
        &self.inner.config
    }

    /// Number of placeholders still waiting for content.
    pub fn pending_count(&self) -> usize {
        self.inner.deferreds.pending_count()
    }

    /// Serve the request directly, then start aggregation whatever the outcome.
    ///
    /// The fetch runs in its own task so aggregation starts when it settles,
    /// even if the caller stops waiting.
    async fn initial_request(&self, key: &str, ignore_fetch_error: bool) -> TemplateResult {
        let coordinator = self.clone();
        let owned_key = key.to_string();
        let settled = tokio::spawn(async move {
            let result = coordinator
                .inner
                .fetcher
                .fetch(&owned_key, ignore_fetch_error)
                .await;
            coordinator.begin_aggregation().await;
            result
        });

        settled
            .await
            .unwrap_or_else(|_| Err(FetchError::Abandoned(key.to_string())))
    }

    /// Enter `Aggregating` and spawn the bundle fetch. Runs once per coordinator.
    async fn begin_aggregation(&self) {
        if self.inner.aggregate_started.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut phase = self.inner.phase.lock().await;
            self.inner.set_phase(&mut phase, Phase::Aggregating);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.aggregate().await;
        });
    }
}

impl Inner {
    fn set_phase(&self, current: &mut Phase, next: Phase) {
        debug_assert!(next >= *current, "phase must not regress");
        if next <= *current {
            return;
        }

        debug!(from = %current, to = %next, "phase transition");
        *current = next;
        self.phase_tx.send_replace(next);
    }

    /// Install a placeholder for `key` unless the cache already has an entry.
    ///
    /// Caller holds the phase lock.
    async fn promise_template(&self, key: &str) {
        self.cache
            .insert_placeholder_with(key, || self.deferreds.reserve(key))
            .await;
    }

    async fn fetch_bundle(&self) -> Result<BundleResponse, FetchError> {
        let response = self
            .transport
            .get(&self.config.bundle_url)
            .await
            .map_err(|e| FetchError::BundleUnavailable(e.to_string()))?;
        BundleResponse::parse(&response)
    }

    async fn aggregate(&self) {
        debug!(url = %self.config.bundle_url, "start aggregate loading phase");

        let outcome = self.fetch_bundle().await;

        let mut phase = self.phase.lock().await;
        let failure = match outcome {
            Ok(bundle) => {
                self.apply_bundle(bundle).await;
                None
            }
            Err(err) => {
                warn!(url = %self.config.bundle_url, error = %err, "template bundle unavailable");
                Some(err)
            }
        };
        let leftovers = self.deferreds.drain_pending();
        self.set_phase(&mut phase, Phase::Satisfied);
        drop(phase);

        self.settle_leftovers(leftovers, failure).await;

        debug!("aggregate loading phase complete");
    }

    /// Resolve waiting placeholders from the bundle and cache everything else it carries.
    async fn apply_bundle(&self, bundle: BundleResponse) {
        let BundleResponse { meta, templates } = bundle;

        for (key, content) in templates {
            let envelope = Envelope::with_meta(content.clone(), meta.clone());
            if !self.deferreds.resolve(&key, Ok(envelope)) {
                self.cache.put(key, Envelope::text(content)).await;
            }
        }
    }

    /// Settle placeholders the bundle did not resolve.
    async fn settle_leftovers(&self, leftovers: Vec<Resolver>, failure: Option<FetchError>) {
        if leftovers.is_empty() {
            return;
        }

        match self.config.on_bundle_failure {
            BundleFailurePolicy::FallBack => {
                debug!(count = leftovers.len(), "fetching unbundled templates individually");
                join_all(leftovers.into_iter().map(|resolver| self.fetch_directly(resolver))).await;
            }
            BundleFailurePolicy::Reject => {
                for resolver in leftovers {
                    let err = match &failure {
                        Some(err) => err.clone(),
                        None => FetchError::NotBundled(resolver.key().to_string()),
                    };
                    debug!(key = resolver.key(), error = %err, "rejecting template");
                    resolver.resolve(Err(err));
                }
            }
        }
    }

    async fn fetch_directly(&self, resolver: Resolver) {
        let result = self
            .transport
            .get(resolver.key())
            .await
            .map(|response| Envelope::with_meta(response.body.clone(), response.meta()));
        resolver.resolve(result);
    }
}
