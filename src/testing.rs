// ABOUTME: Test doubles shared by the unit tests.
// ABOUTME: MockTransport serves canned responses, records calls, and can hold a response back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::FetchError;
use crate::fetch::{Transport, TransportResponse};

#[derive(Clone)]
struct Route {
    response: Result<TransportResponse, FetchError>,
    gate: Option<Arc<Notify>>,
}

/// A transport serving canned responses. Unknown URLs answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for `url`.
    pub fn respond(self, url: &str, body: &str) -> Self {
        self.route(url, Ok(TransportResponse::ok(body)), None)
    }

    /// Fail every request for `url`.
    pub fn fail(self, url: &str, err: FetchError) -> Self {
        self.route(url, Err(err), None)
    }

    /// Hold the response for `url` until `gate` is notified.
    pub fn gated(
        self,
        url: &str,
        response: Result<TransportResponse, FetchError>,
        gate: Arc<Notify>,
    ) -> Self {
        self.route(url, response, Some(gate))
    }

    fn route(
        self,
        url: &str,
        response: Result<TransportResponse, FetchError>,
        gate: Option<Arc<Notify>>,
    ) -> Self {
        self.routes
            .lock()
            .insert(url.to_string(), Route { response, gate });
        self
    }

    /// Every URL requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// How many times `url` was requested.
    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        self.calls.lock().push(url.to_string());
        let route = self.routes.lock().get(url).cloned();

        match route {
            Some(route) => {
                if let Some(gate) = route.gate {
                    gate.notified().await;
                }
                route.response
            }
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Poll `condition` until it holds, panicking after a second.
pub async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let polled = tokio::time::timeout(Duration::from_secs(1), async {
        while !condition().await {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(polled.is_ok(), "condition not met within timeout");
}
