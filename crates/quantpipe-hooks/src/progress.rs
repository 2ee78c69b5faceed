//! Human-readable progress reporting.

use std::fmt;

use chrono::NaiveDate;

use quantpipe_core::AppResult;
use quantpipe_core::error::AppError;
use quantpipe_core::types::ExecutionPlan;

use crate::definitions::{PipelineHooks, ScopeOutcome};

/// Sink receiving progress messages, supplied by the caller.
///
/// Transport is the caller's business: stderr, a status bar, a channel.
/// A sink failure propagates to the engine unchanged.
pub type NotifySink = Box<dyn FnMut(&str) -> AppResult<()> + Send>;

/// Hooks that forward progress messages to a caller-supplied sink.
///
/// Term computation is not reported; only plan creation and run brackets
/// produce messages.
pub struct LogProgressHooks {
    notify: NotifySink,
    // Set when a chunked run is entered and never cleared: an instance is
    // meant to observe at most one chunked run in its lifetime.
    in_chunked_run: bool,
    // Nouns captured on run entry, so the exit message wording matches the
    // entry even if the chunked flag changed in between.
    run_nouns: Vec<&'static str>,
}

impl LogProgressHooks {
    /// Create progress hooks writing to `notify`.
    pub fn new(notify: NotifySink) -> Self {
        Self {
            notify,
            in_chunked_run: false,
            run_nouns: Vec::new(),
        }
    }
}

impl fmt::Debug for LogProgressHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogProgressHooks")
            .field("in_chunked_run", &self.in_chunked_run)
            .finish_non_exhaustive()
    }
}

impl PipelineHooks for LogProgressHooks {
    fn on_create_execution_plan(&mut self, _plan: &ExecutionPlan) -> AppResult<()> {
        (self.notify)("Created execution plan.")
    }

    fn on_run_chunked_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        self.in_chunked_run = true;
        (self.notify)(&format!("Running pipeline from {start_date} to {end_date}"))
    }

    fn on_run_chunked_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        _outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        (self.notify)(&format!(
            "Finished running pipeline from {start_date} to {end_date}"
        ))
    }

    fn on_run_pipeline_start(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<()> {
        let noun = if self.in_chunked_run {
            "pipeline chunk"
        } else {
            "pipeline"
        };
        self.run_nouns.push(noun);
        (self.notify)(&format!("Running {noun} from {start_date} to {end_date}"))
    }

    fn on_run_pipeline_end(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        _outcome: ScopeOutcome<'_>,
    ) -> AppResult<()> {
        let noun = self
            .run_nouns
            .pop()
            .ok_or_else(|| AppError::internal("on_run_pipeline_end without a matching start"))?;
        (self.notify)(&format!(
            "Finished running {noun} from {start_date} to {end_date}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use quantpipe_core::error::ErrorKind;
    use quantpipe_core::types::{PlanId, Term};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recording_sink() -> (NotifySink, Arc<Mutex<Vec<String>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let inner = messages.clone();
        let sink: NotifySink = Box::new(move |msg: &str| {
            inner.lock().unwrap().push(msg.to_string());
            Ok(())
        });
        (sink, messages)
    }

    #[test]
    fn test_plan_creation_message() {
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);

        hooks
            .on_create_execution_plan(&ExecutionPlan::new(PlanId::new(), 3))
            .unwrap();

        assert_eq!(
            *messages.lock().unwrap(),
            vec!["Created execution plan.".to_string()]
        );
    }

    #[test]
    fn test_chunked_run_labels_inner_runs_as_chunks() {
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);
        let (outer_start, outer_end) = (date(2020, 1, 1), date(2020, 1, 31));
        let (inner_start, inner_end) = (date(2020, 1, 1), date(2020, 1, 10));

        hooks
            .on_run_chunked_pipeline_start(outer_start, outer_end)
            .unwrap();
        hooks.on_run_pipeline_start(inner_start, inner_end).unwrap();
        hooks
            .on_run_pipeline_end(inner_start, inner_end, ScopeOutcome::Completed)
            .unwrap();
        hooks
            .on_run_chunked_pipeline_end(outer_start, outer_end, ScopeOutcome::Completed)
            .unwrap();

        assert_eq!(
            *messages.lock().unwrap(),
            vec![
                "Running pipeline from 2020-01-01 to 2020-01-31".to_string(),
                "Running pipeline chunk from 2020-01-01 to 2020-01-10".to_string(),
                "Finished running pipeline chunk from 2020-01-01 to 2020-01-10".to_string(),
                "Finished running pipeline from 2020-01-01 to 2020-01-31".to_string(),
            ]
        );
    }

    #[test]
    fn test_standalone_run_uses_pipeline_noun() {
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);

        hooks
            .on_run_pipeline_start(date(2020, 2, 1), date(2020, 2, 5))
            .unwrap();
        hooks
            .on_run_pipeline_end(date(2020, 2, 1), date(2020, 2, 5), ScopeOutcome::Completed)
            .unwrap();

        assert_eq!(
            *messages.lock().unwrap(),
            vec![
                "Running pipeline from 2020-02-01 to 2020-02-05".to_string(),
                "Finished running pipeline from 2020-02-01 to 2020-02-05".to_string(),
            ]
        );
    }

    #[test]
    fn test_chunk_labeling_sticks_after_chunked_run_ends() {
        // The chunked flag is never cleared; a run after the chunked
        // bracket has exited is still labeled a chunk.
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);

        hooks
            .on_run_chunked_pipeline_start(date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();
        hooks
            .on_run_chunked_pipeline_end(
                date(2020, 1, 1),
                date(2020, 1, 31),
                ScopeOutcome::Completed,
            )
            .unwrap();
        hooks
            .on_run_pipeline_start(date(2020, 3, 1), date(2020, 3, 2))
            .unwrap();

        assert_eq!(
            messages.lock().unwrap().last().unwrap(),
            "Running pipeline chunk from 2020-03-01 to 2020-03-02"
        );
    }

    #[test]
    fn test_finished_message_fires_on_failure() {
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);
        let err = AppError::execution("chunk failed");

        hooks
            .on_run_pipeline_start(date(2020, 1, 1), date(2020, 1, 10))
            .unwrap();
        hooks
            .on_run_pipeline_end(date(2020, 1, 1), date(2020, 1, 10), ScopeOutcome::Failed(&err))
            .unwrap();

        assert_eq!(
            messages.lock().unwrap().last().unwrap(),
            "Finished running pipeline from 2020-01-01 to 2020-01-10"
        );
    }

    #[test]
    fn test_sink_failure_propagates() {
        let sink: NotifySink = Box::new(|_msg| Err(AppError::notification("sink closed")));
        let mut hooks = LogProgressHooks::new(sink);

        let err = hooks
            .on_create_execution_plan(&ExecutionPlan::new(PlanId::new(), 1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Notification);
    }

    #[test]
    fn test_run_end_without_start_is_an_error() {
        let (sink, _messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);

        let err = hooks
            .on_run_pipeline_end(date(2020, 1, 1), date(2020, 1, 2), ScopeOutcome::Completed)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_term_computation_is_not_reported() {
        let (sink, messages) = recording_sink();
        let mut hooks = LogProgressHooks::new(sink);
        let term = Term::new("alpha");

        hooks.compute_term_start(&term).unwrap();
        hooks
            .compute_term_end(&term, ScopeOutcome::Completed)
            .unwrap();

        assert!(messages.lock().unwrap().is_empty());
    }
}
