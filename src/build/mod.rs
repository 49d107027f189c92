// ABOUTME: Build module - produces the bundle document from a template directory.
// ABOUTME: Offline, sequential file I/O; used by the build-template-bundle binary.

mod bundle;

pub use bundle::*;
