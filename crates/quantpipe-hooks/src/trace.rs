//! Structured telemetry hooks built on `tracing`.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use quantpipe_core::AppResult;
use quantpipe_core::types::{ExecutionPlan, Term};

use crate::definitions::{PipelineHooks, ScopeOutcome};

/// Hooks that emit `tracing` events at every lifecycle point.
///
/// The human-readable counterpart is
/// [`LogProgressHooks`](crate::progress::LogProgressHooks); this one is
/// for subscribers that want fields, not sentences. Run-level events are
/// `info`, per-term events are `debug` (a plan can have thousands of
/// terms). Never fails on its own account.
#[derive(Debug, Default)]
pub struct TracingHooks {
    chunked_starts: Vec<Instant>,
    run_starts: Vec<Instant>,
    term_starts: Vec<Instant>,
}

impl TracingHooks {
    /// Create tracing hooks.
    pub fn new() -> Self {
        Self::default()
    }
}

fn status(outcome: &ScopeOutcome<'_>) -> &'static str {
    if outcome.is_failed() { "failed" } else { "completed" }
}

fn elapsed_ms(start: Option<Instant>) -> Option<u64> {
    start.map(|t| t.elapsed().as_millis() as u64)
}

impl PipelineHooks for TracingHooks {
    fn on_create_execution_plan(&mut self, plan: &ExecutionPlan) -> AppResult<()> {
        debug!(plan_id = %plan.id, term_count = plan.term_count, "Execution plan created");
        Ok(())
    }

    fn on_run_chunked_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        self.chunked_starts.push(Instant::now());
        info!(%start_date, %end_date, "Chunked pipeline run started");
        Ok(())
    }

    fn on_run_chunked_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        let elapsed_ms = elapsed_ms(self.chunked_starts.pop());
        info!(
            %start_date,
            %end_date,
            elapsed_ms,
            status = status(&outcome),
            "Chunked pipeline run finished"
        );
        Ok(())
    }

    fn on_run_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        self.run_starts.push(Instant::now());
        info!(%start_date, %end_date, "Pipeline run started");
        Ok(())
    }

    fn on_run_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        let elapsed_ms = elapsed_ms(self.run_starts.pop());
        info!(
            %start_date,
            %end_date,
            elapsed_ms,
            status = status(&outcome),
            "Pipeline run finished"
        );
        Ok(())
    }

    fn compute_term_start(&mut self, term: &Term) -> AppResult<()> {
        self.term_starts.push(Instant::now());
        debug!(term = %term, "Term computation started");
        Ok(())
    }

    fn compute_term_end(&mut self, term: &Term, outcome: ScopeOutcome<'_>) -> AppResult<()> {
        let elapsed_ms = elapsed_ms(self.term_starts.pop());
        debug!(
            term = %term,
            elapsed_ms,
            status = status(&outcome),
            "Term computation finished"
        );
        Ok(())
    }
}
