// ABOUTME: Coordinator module for phase-based template request dispatch.
// ABOUTME: Contains the phase machine, the deferred registry, and bundle handling.

mod bundle;
mod coordinator;
mod deferred;
mod phase;

pub use bundle::BundleResponse;
pub use coordinator::Coordinator;
pub use deferred::DeferredRegistry;
pub use phase::Phase;
