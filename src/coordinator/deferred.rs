// ABOUTME: DeferredRegistry - tracks which template keys have a placeholder
// ABOUTME: awaiting the bundle, and holds the resolver for each of them.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::template::{Placeholder, Resolver, TemplateResult};

/// Registry of outstanding placeholders, keyed by template key.
///
/// A key is reserved at most once for the registry's lifetime. Resolved keys
/// keep their slot (emptied) so a second `reserve` stays a no-op.
/// Operations never await, so each one runs to completion without interleaving.
#[derive(Default)]
pub struct DeferredRegistry {
    deferreds: Mutex<HashMap<String, Option<Resolver>>>,
}

impl DeferredRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `key`, returning the placeholder waiters should observe.
    ///
    /// Returns `None` if the key was already reserved.
    pub fn reserve(&self, key: &str) -> Option<Placeholder> {
        let mut deferreds = self.deferreds.lock();
        if deferreds.contains_key(key) {
            return None;
        }

        debug!(key, "promising template");
        let (resolver, placeholder) = Placeholder::new(key);
        deferreds.insert(key.to_string(), Some(resolver));
        Some(placeholder)
    }

    /// Resolve the placeholder for `key`.
    ///
    /// Returns true if a waiter was pending and has now been settled.
    pub fn resolve(&self, key: &str, result: TemplateResult) -> bool {
        let resolver = self.deferreds.lock().get_mut(key).and_then(Option::take);

        match resolver {
            Some(resolver) => {
                debug!(key, "resolving template");
                resolver.resolve(result);
                true
            }
            None => {
                debug!(key, "no waiter for template");
                false
            }
        }
    }

    /// Take every resolver that has not been settled yet, sorted by key.
    pub fn drain_pending(&self) -> Vec<Resolver> {
        let mut deferreds = self.deferreds.lock();
        let mut pending: Vec<Resolver> = deferreds.values_mut().filter_map(Option::take).collect();
        pending.sort_by(|a, b| a.key().cmp(b.key()));
        pending
    }

    /// Whether `key` has ever been reserved.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.deferreds.lock().contains_key(key)
    }

    /// Number of placeholders still awaiting resolution.
    pub fn pending_count(&self) -> usize {
        self.deferreds.lock().values().filter(|r| r.is_some()).count()
    }
}
