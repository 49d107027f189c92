// ABOUTME: Tests for TemplateCache - storing, placeholders, and eviction.
// ABOUTME: Checks that resolved content is never overwritten.

use super::*;
use crate::template::{Envelope, Placeholder};

#[tokio::test]
async fn test_put_and_get() {
    let cache = TemplateCache::new();
    assert!(cache.put("a.html", Envelope::text("<p>A</p>")).await);

    match cache.get("a.html").await {
        Some(CacheEntry::Resolved(envelope)) => assert_eq!(envelope.data, "<p>A</p>"),
        other => panic!("Expected resolved entry, got {:?}", other),
    }
    assert!(cache.get("missing.html").await.is_none());
}

#[tokio::test]
async fn test_resolved_content_is_never_replaced() {
    let cache = TemplateCache::new();
    cache.put("a.html", Envelope::text("first")).await;

    assert!(!cache.put("a.html", Envelope::text("second")).await);

    match cache.get("a.html").await {
        Some(CacheEntry::Resolved(envelope)) => assert_eq!(envelope.data, "first"),
        other => panic!("Expected resolved entry, got {:?}", other),
    }
}

#[tokio::test]
async fn test_put_replaces_pending() {
    let cache = TemplateCache::new();
    let (_resolver, placeholder) = Placeholder::new("a.html");
    cache
        .insert_placeholder_with("a.html", || Some(placeholder))
        .await
        .unwrap();

    assert!(cache.put("a.html", Envelope::text("<p>A</p>")).await);
    assert!(!cache.get("a.html").await.unwrap().is_pending());
}

#[tokio::test]
async fn test_insert_placeholder_only_when_absent() {
    let cache = TemplateCache::new();
    cache.put("a.html", Envelope::text("<p>A</p>")).await;

    let mut called = false;
    let installed = cache
        .insert_placeholder_with("a.html", || {
            called = true;
            Some(Placeholder::new("a.html").1)
        })
        .await;

    assert!(installed.is_none());
    assert!(!called, "factory must not run when an entry exists");
}

#[tokio::test]
async fn test_insert_placeholder_declined() {
    let cache = TemplateCache::new();
    let installed = cache.insert_placeholder_with("a.html", || None).await;

    assert!(installed.is_none());
    assert!(!cache.contains("a.html").await);
}

#[tokio::test]
async fn test_evict_pending_only() {
    let cache = TemplateCache::new();
    cache.put("a.html", Envelope::text("<p>A</p>")).await;
    cache
        .insert_placeholder_with("b.html", || Some(Placeholder::new("b.html").1))
        .await;

    assert!(!cache.evict_pending("a.html").await);
    assert!(cache.evict_pending("b.html").await);
    assert_eq!(cache.keys().await, vec!["a.html"]);
}

#[tokio::test]
async fn test_clone_shares_state() {
    let cache = TemplateCache::new();
    let clone = cache.clone();

    cache.put("a.html", Envelope::text("<p>A</p>")).await;
    assert_eq!(clone.len().await, 1);
    assert!(!clone.is_empty().await);
}
