// ABOUTME: Tests for CachingFetcher - cache hits, network fetches, placeholders.
// ABOUTME: Uses MockTransport to count network requests.

use std::sync::Arc;

use super::*;
use crate::cache::{CacheEntry, TemplateCache};
use crate::error::FetchError;
use crate::template::{Envelope, Placeholder};
use crate::testing::MockTransport;

fn fetcher_with(transport: MockTransport) -> (CachingFetcher, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let fetcher = CachingFetcher::new(TemplateCache::new(), transport.clone());
    (fetcher, transport)
}

#[tokio::test]
async fn test_fetch_miss_goes_to_network_and_caches() {
    let (fetcher, transport) = fetcher_with(MockTransport::new().respond("a.html", "<p>A</p>"));

    let envelope = fetcher.fetch("a.html", false).await.unwrap();
    assert_eq!(envelope.data, "<p>A</p>");
    assert_eq!(envelope.status(), Some(200));

    let again = fetcher.fetch("a.html", false).await.unwrap();
    assert_eq!(again.data, "<p>A</p>");
    assert_eq!(transport.call_count("a.html"), 1);
}

#[tokio::test]
async fn test_fetch_hit_skips_network() {
    let (fetcher, transport) = fetcher_with(MockTransport::new());
    fetcher.cache().put("a.html", Envelope::text("cached")).await;

    let envelope = fetcher.fetch("a.html", false).await.unwrap();
    assert_eq!(envelope.data, "cached");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_waits_on_placeholder() {
    let (fetcher, transport) = fetcher_with(MockTransport::new());
    let (resolver, placeholder) = Placeholder::new("a.html");
    fetcher
        .cache()
        .insert_placeholder_with("a.html", || Some(placeholder))
        .await;

    resolver.resolve(Ok(Envelope::text("<p>A</p>")));

    let envelope = fetcher.fetch("a.html", false).await.unwrap();
    assert_eq!(envelope.data, "<p>A</p>");
    assert!(transport.calls().is_empty());

    match fetcher.cache().get("a.html").await {
        Some(CacheEntry::Resolved(envelope)) => assert_eq!(envelope.data, "<p>A</p>"),
        other => panic!("Expected resolved entry, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_placeholder_is_evicted() {
    let (fetcher, _transport) = fetcher_with(MockTransport::new());
    let (resolver, placeholder) = Placeholder::new("a.html");
    fetcher
        .cache()
        .insert_placeholder_with("a.html", || Some(placeholder))
        .await;

    resolver.resolve(Err(FetchError::BundleUnavailable("down".to_string())));

    let err = fetcher.fetch("a.html", true).await.unwrap_err();
    assert!(matches!(err, FetchError::BundleUnavailable(_)));
    assert!(!fetcher.cache().contains("a.html").await);
}

#[tokio::test]
async fn test_error_surfaced_as_template_load() {
    let (fetcher, _transport) = fetcher_with(MockTransport::new());

    match fetcher.fetch("missing.html", false).await {
        Err(FetchError::TemplateLoad { key, reason }) => {
            assert_eq!(key, "missing.html");
            assert!(reason.contains("404"));
        }
        other => panic!("Expected TemplateLoad, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ignored_error_returned_as_is() {
    let (fetcher, _transport) = fetcher_with(MockTransport::new());

    let err = fetcher.fetch("missing.html", true).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            url: "missing.html".to_string(),
            status: 404
        }
    );
}

#[tokio::test]
async fn test_failures_not_cached() {
    let (fetcher, transport) = fetcher_with(
        MockTransport::new().fail("a.html", FetchError::Http("reset".to_string())),
    );

    assert!(fetcher.fetch("a.html", true).await.is_err());
    assert!(fetcher.fetch("a.html", true).await.is_err());

    assert!(fetcher.cache().is_empty().await);
    assert_eq!(transport.call_count("a.html"), 2);
}
