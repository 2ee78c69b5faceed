//! Fan-out of one logical hook call to an ordered list of hooks.
//!
//! Dispatch policy:
//!
//! - Plain operations run on every hook in list order and fail fast: the
//!   first failure propagates immediately and the remaining hooks are
//!   skipped, so their side effects do not happen.
//! - Scoped entries run in list order 1..N. If hook k's entry fails, the
//!   k-1 brackets already entered are exited in reverse order with that
//!   failure as their outcome before it propagates; a failure from one of
//!   those exits is logged at `warn` and does not replace the triggering
//!   failure.
//! - Scoped exits run in reverse order N..1, each exactly once, whatever
//!   the guarded work did. Every exit runs even when an earlier one
//!   fails; the first exit failure propagates once all have run, later
//!   ones are logged.
//!
//! The composition is equivalent to nesting each hook's bracket inside
//! the previous hook's, with hook 1 outermost.

use chrono::NaiveDate;
use tracing::{debug, warn};

use quantpipe_core::AppResult;
use quantpipe_core::error::AppError;
use quantpipe_core::types::{ExecutionPlan, Term};

use crate::definitions::{PipelineHooks, ScopeOutcome};
use crate::noop::NoOpHooks;

/// Build a single dispatch target from an ordered list of hooks.
///
/// Zero hooks yield [`NoOpHooks`]; exactly one yields that hook itself,
/// with no wrapper layer and no double dispatch; more yield the fan-out
/// wrapper. Callers hold one [`PipelineHooks`] object either way — the
/// concrete type behind the box is a dispatch optimization, not part of
/// the contract.
pub fn delegating_hooks(mut hooks: Vec<Box<dyn PipelineHooks>>) -> Box<dyn PipelineHooks> {
    debug!(hooks = hooks.len(), "Building hook dispatch target");
    match hooks.len() {
        0 => Box::new(NoOpHooks),
        1 => hooks.remove(0),
        _ => Box::new(DelegatingHooks { hooks }),
    }
}

/// Fan-out wrapper over two or more hooks.
///
/// Constructed via [`delegating_hooks`]; the held list is fixed for the
/// wrapper's lifetime. Exposes exactly the contract's operations and adds
/// none of its own.
#[derive(Debug)]
pub struct DelegatingHooks {
    hooks: Vec<Box<dyn PipelineHooks>>,
}

impl DelegatingHooks {
    /// Enter every hook's bracket in list order, unwinding the brackets
    /// already entered if one entry fails.
    fn enter_each(
        &mut self,
        enter: impl Fn(&mut dyn PipelineHooks) -> AppResult<()>,
        exit: impl Fn(&mut dyn PipelineHooks, ScopeOutcome<'_>) -> AppResult<()>,
    ) -> AppResult<()> {
        for idx in 0..self.hooks.len() {
            if let Err(err) = enter(self.hooks[idx].as_mut()) {
                // Unwind innermost first; the entry failure is the one
                // the caller gets.
                for entered in self.hooks[..idx].iter_mut().rev() {
                    if let Err(exit_err) = exit(entered.as_mut(), ScopeOutcome::Failed(&err)) {
                        warn!(error = %exit_err, "Hook exit failed while unwinding a failed entry");
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Exit every hook's bracket in reverse list order. All exits run;
    /// the first failure wins.
    fn exit_each(
        &mut self,
        outcome: ScopeOutcome<'_>,
        exit: impl Fn(&mut dyn PipelineHooks, ScopeOutcome<'_>) -> AppResult<()>,
    ) -> AppResult<()> {
        let mut first_err: Option<AppError> = None;
        for hook in self.hooks.iter_mut().rev() {
            if let Err(err) = exit(hook.as_mut(), outcome) {
                if first_err.is_none() {
                    first_err = Some(err);
                } else {
                    warn!(error = %err, "Hook exit failed after an earlier exit failure");
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl PipelineHooks for DelegatingHooks {
    fn on_create_execution_plan(&mut self, plan: &ExecutionPlan) -> AppResult<()> {
        for hook in &mut self.hooks {
            hook.on_create_execution_plan(plan)?;
        }
        Ok(())
    }

    fn on_run_chunked_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        self.enter_each(
            |h| h.on_run_chunked_pipeline_start(start_date, end_date),
            |h, outcome| h.on_run_chunked_pipeline_end(start_date, end_date, outcome),
        )
    }

    fn on_run_chunked_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        self.exit_each(outcome, |h, o| {
            h.on_run_chunked_pipeline_end(start_date, end_date, o)
        })
    }

    fn on_run_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        self.enter_each(
            |h| h.on_run_pipeline_start(start_date, end_date),
            |h, outcome| h.on_run_pipeline_end(start_date, end_date, outcome),
        )
    }

    fn on_run_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        self.exit_each(outcome, |h, o| h.on_run_pipeline_end(start_date, end_date, o))
    }

    fn compute_term_start(&mut self, term: &Term) -> AppResult<()> {
        self.enter_each(
            |h| h.compute_term_start(term),
            |h, outcome| h.compute_term_end(term, outcome),
        )
    }

    fn compute_term_end(&mut self, term: &Term, outcome: ScopeOutcome<'_>) -> AppResult<()> {
        self.exit_each(outcome, |h, o| h.compute_term_end(term, o))
    }
}
