// ABOUTME: Fetch module - network transport and the cache-aware template fetcher.
// ABOUTME: The coordinator wraps a TemplateFetcher without changing its contract.

mod fetcher;
mod http;
mod transport;

pub use fetcher::*;
pub use http::*;
pub use transport::*;

#[cfg(test)]
mod fetcher_test;
