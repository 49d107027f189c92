// ABOUTME: Template cache module - the shared key to content store.
// ABOUTME: Entries are resolved content or a placeholder still awaiting it.

mod store;

pub use store::*;

#[cfg(test)]
mod store_test;
