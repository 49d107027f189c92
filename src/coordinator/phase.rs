// ABOUTME: The coordinator lifecycle stage.
// ABOUTME: Ordered so that transitions can be checked for monotonicity.

use std::fmt;

/// Lifecycle stage governing how a template request is handled.
///
/// Only ever moves forward: `Initial` → `Aggregating` → `Satisfied`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Requests go straight to the network; the first to settle starts the bundle fetch.
    #[default]
    Initial,
    /// The bundle is in flight; requests wait on placeholders.
    Aggregating,
    /// The bundle has been handled; requests pass straight through.
    Satisfied,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Aggregating => write!(f, "aggregating"),
            Phase::Satisfied => write!(f, "satisfied"),
        }
    }
}
