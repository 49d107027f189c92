// ABOUTME: Implements TemplateCache - a thread-safe, shareable map from template
// ABOUTME: key to either resolved content or a pending placeholder.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::template::{Envelope, Placeholder};

/// A value held by the [`TemplateCache`].
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// Content is known.
    Resolved(Envelope),
    /// Content will arrive through the placeholder.
    Pending(Placeholder),
}

impl CacheEntry {
    /// Whether this entry still awaits content.
    pub fn is_pending(&self) -> bool {
        matches!(self, CacheEntry::Pending(_))
    }
}

/// Shared template cache.
///
/// Holds at most one entry per key. Resolved content is never replaced;
/// a pending entry is replaced by its content or evicted on failure.
/// Clones share the same underlying map.
#[derive(Default)]
pub struct TemplateCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl TemplateCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a key.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    /// Whether any entry exists for a key.
    pub async fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        entries.contains_key(key)
    }

    /// Store resolved content.
    ///
    /// Replaces a pending entry. Returns false and leaves the cache untouched
    /// if content is already stored for the key.
    pub async fn put(&self, key: impl Into<String>, content: Envelope) -> bool {
        let mut entries = self.entries.write().await;
        let key = key.into();

        if let Some(CacheEntry::Resolved(_)) = entries.get(&key) {
            return false;
        }
        entries.insert(key, CacheEntry::Resolved(content));
        true
    }

    /// Install a placeholder if the key has no entry.
    ///
    /// `make` runs under the write lock and only when the key is absent, so the
    /// check and the insert cannot interleave with another writer. Returns the
    /// installed placeholder, or `None` if an entry already existed or `make`
    /// declined.
    pub async fn insert_placeholder_with<F>(&self, key: &str, make: F) -> Option<Placeholder>
    where
        F: FnOnce() -> Option<Placeholder>,
    {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return None;
        }

        let placeholder = make()?;
        entries.insert(key.to_string(), CacheEntry::Pending(placeholder.clone()));
        Some(placeholder)
    }

    /// Evict a pending entry. Resolved content is left in place.
    ///
    /// Returns true if an entry was removed.
    pub async fn evict_pending(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(CacheEntry::Pending(_)) => {
                entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// List all keys, sorted alphabetically.
    pub async fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        let mut keys: Vec<_> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of entries, pending or resolved.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for TemplateCache {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}
