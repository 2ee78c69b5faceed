//! The pipeline hook contract: operation set and scope outcomes.
//!
//! The engine notifies hooks at four lifecycle points. One is a plain
//! notification; three bracket a unit of guarded work with an explicit
//! start/end pair:
//!
//! | Operation | Kind |
//! |-----------|------|
//! | `on_create_execution_plan` | plain |
//! | `on_run_chunked_pipeline_start` / `_end` | scoped |
//! | `on_run_pipeline_start` / `_end` | scoped |
//! | `compute_term_start` / `_end` | scoped |
//!
//! For scoped operations the engine must call `_end` exactly once for
//! every `_start` that returned `Ok`, whatever the guarded work did in
//! between — including when it failed. A `_start` that returned `Err`
//! gets no `_end`. The guarded work's result reaches `_end` as a
//! [`ScopeOutcome`]; no provided implementation turns a failed outcome
//! into a success.

use std::fmt;

use chrono::NaiveDate;

use quantpipe_core::AppResult;
use quantpipe_core::error::AppError;
use quantpipe_core::types::{ExecutionPlan, Term};

/// How the guarded work inside a scoped operation ended.
#[derive(Debug, Clone, Copy)]
pub enum ScopeOutcome<'a> {
    /// The guarded work ran to completion.
    Completed,
    /// The guarded work (or a later hook's bracket entry) failed.
    Failed(&'a AppError),
}

impl ScopeOutcome<'_> {
    /// Returns the failure carried by this outcome, if any.
    pub fn failure(&self) -> Option<&AppError> {
        match self {
            Self::Completed => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// Returns whether the guarded work failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for ScopeOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Observer contract for pipeline lifecycle events.
///
/// Every operation has a default no-op body, so implementations override
/// only the subset they care about; unoverridden operations stay inert.
/// All operations return [`AppResult`] — a hook failure propagates to the
/// engine through `?` and aborts the current dispatch step.
pub trait PipelineHooks: Send + fmt::Debug {
    /// Called once after the engine has compiled an execution plan.
    fn on_create_execution_plan(&mut self, _plan: &ExecutionPlan) -> AppResult<()> {
        Ok(())
    }

    /// Enters the bracket around a chunked run covering
    /// `[start_date, end_date]`.
    fn on_run_chunked_pipeline_start(
        &mut self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Exits the bracket opened by
    /// [`on_run_chunked_pipeline_start`](Self::on_run_chunked_pipeline_start).
    fn on_run_chunked_pipeline_end(
        &mut self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        _outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Enters the bracket around a single bounded-range run. Inside a
    /// chunked run the engine opens one such bracket per chunk.
    fn on_run_pipeline_start(
        &mut self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Exits the bracket opened by
    /// [`on_run_pipeline_start`](Self::on_run_pipeline_start).
    fn on_run_pipeline_end(
        &mut self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        _outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        Ok(())
    }

    /// Enters the bracket around the computation of one term.
    fn compute_term_start(&mut self, _term: &Term) -> AppResult<()> {
        Ok(())
    }

    /// Exits the bracket opened by
    /// [`compute_term_start`](Self::compute_term_start).
    fn compute_term_end(&mut self, _term: &Term, _outcome: ScopeOutcome<'_>) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantpipe_core::types::PlanId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A partial implementation: overrides one operation, inherits the rest.
    #[derive(Debug, Default)]
    struct PlanCounter {
        plans_seen: usize,
    }

    impl PipelineHooks for PlanCounter {
        fn on_create_execution_plan(&mut self, _plan: &ExecutionPlan) -> AppResult<()> {
            self.plans_seen += 1;
            Ok(())
        }
    }

    #[test]
    fn test_default_methods_are_inert() {
        let mut hooks = PlanCounter::default();
        hooks
            .on_run_chunked_pipeline_start(date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();
        hooks
            .on_run_pipeline_end(date(2020, 1, 1), date(2020, 1, 31), ScopeOutcome::Completed)
            .unwrap();
        hooks.compute_term_start(&Term::new("alpha")).unwrap();
        assert_eq!(hooks.plans_seen, 0);
    }

    #[test]
    fn test_partial_override_through_trait_object() {
        let mut hooks: Box<dyn PipelineHooks> = Box::new(PlanCounter::default());
        let plan = ExecutionPlan::new(PlanId::new(), 2);
        hooks.on_create_execution_plan(&plan).unwrap();
        hooks.on_create_execution_plan(&plan).unwrap();
        assert!(format!("{hooks:?}").contains("plans_seen: 2"));
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(!ScopeOutcome::Completed.is_failed());
        assert!(ScopeOutcome::Completed.failure().is_none());

        let err = AppError::execution("term blew up");
        let outcome = ScopeOutcome::Failed(&err);
        assert!(outcome.is_failed());
        assert_eq!(outcome.failure().unwrap().message, "term blew up");
    }

    #[test]
    fn test_outcome_display() {
        let err = AppError::execution("term blew up");
        assert_eq!(ScopeOutcome::Completed.to_string(), "completed");
        assert_eq!(
            ScopeOutcome::Failed(&err).to_string(),
            "failed: EXECUTION: term blew up"
        );
    }
}
