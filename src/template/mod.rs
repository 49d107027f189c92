// ABOUTME: Template module - the values that flow through a template request.
// ABOUTME: Envelopes carry content, placeholders stand in for content not yet known.

mod envelope;
mod placeholder;

pub use envelope::*;
pub use placeholder::*;
