//! # quantpipe-hooks
//!
//! Instrumentation hooks for the Quantpipe pipeline engine. Provides:
//!
//! - The [`PipelineHooks`] contract: one plain notification and three
//!   scoped (bracketing) operations around units of guarded pipeline work
//! - [`NoOpHooks`] — the inert default
//! - [`LogProgressHooks`] — human-readable progress messages to a
//!   caller-supplied sink
//! - [`TracingHooks`] — structured telemetry via `tracing`
//! - [`delegating_hooks`] — a single dispatch target fanning out to an
//!   ordered list of hooks
//! - Config-driven assembly of the installed hook set
//!
//! The engine holds exactly one `Box<dyn PipelineHooks>` and never knows
//! how many observers sit behind it.

pub mod assemble;
pub mod definitions;
pub mod delegate;
pub mod noop;
pub mod progress;
pub mod trace;

pub use assemble::assemble_hooks;
pub use definitions::{PipelineHooks, ScopeOutcome};
pub use delegate::{DelegatingHooks, delegating_hooks};
pub use noop::NoOpHooks;
pub use progress::{LogProgressHooks, NotifySink};
pub use trace::TracingHooks;
