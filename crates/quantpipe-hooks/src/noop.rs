//! The inert hook implementation.

use crate::definitions::PipelineHooks;

/// Hooks that do nothing at every lifecycle point.
///
/// Installed as the dispatch target when no hooks are configured. Scoped
/// exits never alter the guarded work's outcome. Zero-sized, so carrying
/// one costs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHooks;

impl PipelineHooks for NoOpHooks {}
