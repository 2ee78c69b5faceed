//! Core type definitions used across the Quantpipe workspace.

pub mod plan;
pub mod term;

pub use plan::{ExecutionPlan, PlanId};
pub use term::Term;
