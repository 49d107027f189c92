// ABOUTME: Single-assignment placeholder for template content not yet known.
// ABOUTME: One Resolver settles it exactly once; any number of clones observe the result.

use std::fmt;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::oneshot;

use super::TemplateResult;
use crate::error::FetchError;

/// A template whose content will be known later.
///
/// Cloning is cheap and every clone observes the same outcome.
#[derive(Clone)]
pub struct Placeholder {
    key: String,
    inner: Shared<BoxFuture<'static, TemplateResult>>,
}

/// The write side of a [`Placeholder`].
///
/// Resolution consumes the resolver, so a placeholder can only ever be settled once.
pub struct Resolver {
    key: String,
    sender: oneshot::Sender<TemplateResult>,
}

impl Placeholder {
    /// Create an unresolved placeholder for `key` and its resolver.
    pub fn new(key: impl Into<String>) -> (Resolver, Placeholder) {
        let key = key.into();
        let (sender, receiver) = oneshot::channel();

        let abandoned = key.clone();
        let inner = receiver
            .map(move |received| {
                received.unwrap_or_else(|_| Err(FetchError::Abandoned(abandoned)))
            })
            .boxed()
            .shared();

        (
            Resolver {
                key: key.clone(),
                sender,
            },
            Placeholder { key, inner },
        )
    }

    /// The template key this placeholder stands for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Wait for the placeholder to be resolved.
    pub async fn wait(&self) -> TemplateResult {
        self.inner.clone().await
    }

    /// The outcome, if the placeholder has already been resolved and observed.
    pub fn peek(&self) -> Option<&TemplateResult> {
        self.inner.peek()
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("key", &self.key)
            .field("resolved", &self.inner.peek().is_some())
            .finish()
    }
}

impl Resolver {
    /// The template key this resolver settles.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Settle the placeholder.
    ///
    /// Returns false if every observer was already dropped.
    pub fn resolve(self, result: TemplateResult) -> bool {
        self.sender.send(result).is_ok()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("key", &self.key).finish()
    }
}
