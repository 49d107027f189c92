// ABOUTME: Root module for template-bundler - fetch all but the first templates in one request.
// ABOUTME: Re-exports the coordinator and the types that flow through it.

pub mod build;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod prelude;
pub mod template;

#[cfg(test)]
mod testing;

pub use coordinator::Coordinator;
pub use error::BundlerError;
