//! Config-driven assembly of the installed hook set.

use tracing::info;

use quantpipe_core::config::HooksConfig;

use crate::definitions::PipelineHooks;
use crate::delegate::delegating_hooks;
use crate::progress::{LogProgressHooks, NotifySink};
use crate::trace::TracingHooks;

/// Build the dispatch target the engine will carry for a run.
///
/// The progress hook is installed only when enabled *and* a sink was
/// supplied; the tracing hook whenever enabled. With nothing installed
/// the engine gets the inert target. Hook order is fixed: progress first,
/// tracing second.
pub fn assemble_hooks(config: &HooksConfig, notify: Option<NotifySink>) -> Box<dyn PipelineHooks> {
    let mut hooks: Vec<Box<dyn PipelineHooks>> = Vec::new();

    if let (true, Some(notify)) = (config.progress, notify) {
        hooks.push(Box::new(LogProgressHooks::new(notify)));
    }
    if config.trace {
        hooks.push(Box::new(TracingHooks::new()));
    }

    info!(hooks = hooks.len(), "Assembled pipeline hooks");
    delegating_hooks(hooks)
}
