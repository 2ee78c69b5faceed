//! Term payload type as seen by pipeline hooks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single computation term within an execution plan.
///
/// Like [`ExecutionPlan`](crate::types::ExecutionPlan), this is an opaque
/// handle: computation logic and inputs live in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Display name of the term.
    pub name: String,
}

impl Term {
    /// Create a new term handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
