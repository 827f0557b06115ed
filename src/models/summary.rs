//! Suite summary models
//!
//! Suite-level counts and verdict, recomputed from example states on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::example::{Example, ExampleState};

/// Snapshot of a suite at one point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub suite_description: String,
    pub suite_succeeded: bool,

    pub number_of_examples_before_parallelization: usize,
    pub number_of_total_examples: usize,
    pub number_of_examples_that_will_be_run: usize,
    pub number_of_pending_examples: usize,
    pub number_of_skipped_examples: usize,
    pub number_of_passed_examples: usize,
    pub number_of_failed_examples: usize,

    pub started_at: Option<DateTime<Utc>>,
    /// Only set on the end-of-suite summary
    pub run_time: Option<Duration>,
}

impl SuiteSummary {
    /// Aggregate counts from the current state of `examples`
    pub fn from_examples(
        description: impl Into<String>,
        examples: &[Box<dyn Example>],
        count_before_parallelization: usize,
        fail_on_pending: bool,
    ) -> Self {
        let will_run = count_examples_satisfying(examples, |e| !e.skipped_or_pending());
        let pending = count_examples_satisfying(examples, |e| e.state() == ExampleState::Pending);
        let skipped = count_examples_satisfying(examples, |e| e.state() == ExampleState::Skipped);
        let passed = count_examples_satisfying(examples, |e| e.state() == ExampleState::Passed);
        let failed = count_examples_satisfying(examples, |e| e.failed());

        let success = failed == 0 && !(pending > 0 && fail_on_pending);

        Self {
            suite_description: description.into(),
            suite_succeeded: success,
            number_of_examples_before_parallelization: count_before_parallelization,
            number_of_total_examples: examples.len(),
            number_of_examples_that_will_be_run: will_run,
            number_of_pending_examples: pending,
            number_of_skipped_examples: skipped,
            number_of_passed_examples: passed,
            number_of_failed_examples: failed,
            started_at: None,
            run_time: None,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_run_time(mut self, run_time: Duration) -> Self {
        self.run_time = Some(run_time);
        self
    }

    pub fn pass_rate(&self) -> f64 {
        if self.number_of_examples_that_will_be_run == 0 {
            0.0
        } else {
            (self.number_of_passed_examples as f64
                / self.number_of_examples_that_will_be_run as f64)
                * 100.0
        }
    }
}

fn count_examples_satisfying<F>(examples: &[Box<dyn Example>], filter: F) -> usize
where
    F: Fn(&dyn Example) -> bool,
{
    examples.iter().filter(|e| filter(e.as_ref())).count()
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} | Pass: {} | Fail: {} | Pending: {} | Skip: {} | Ran {} of {}",
            self.suite_description,
            if self.suite_succeeded { "SUCCESS" } else { "FAIL" },
            self.number_of_passed_examples,
            self.number_of_failed_examples,
            self.number_of_pending_examples,
            self.number_of_skipped_examples,
            self.number_of_examples_that_will_be_run,
            self.number_of_examples_before_parallelization
        )?;
        if let Some(run_time) = self.run_time {
            write!(f, " | Duration: {}ms", run_time.as_millis())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::FailureRouter;
    use crate::models::{FailureData, SpecExample};

    fn boxed(example: SpecExample) -> Box<dyn Example> {
        Box::new(example)
    }

    #[test]
    fn test_counts_before_run() {
        let mut skipped = SpecExample::new(["skipped"], || Ok(()));
        skipped.skip();
        let examples = vec![
            boxed(SpecExample::new(["a"], || Ok(()))),
            boxed(SpecExample::new_pending(["b"])),
            boxed(skipped),
        ];

        let summary = SuiteSummary::from_examples("suite", &examples, 3, false);
        assert_eq!(summary.number_of_total_examples, 3);
        assert_eq!(summary.number_of_examples_that_will_be_run, 1);
        assert_eq!(summary.number_of_pending_examples, 1);
        assert_eq!(summary.number_of_skipped_examples, 1);
        assert_eq!(summary.number_of_passed_examples, 0);
        assert!(summary.suite_succeeded);
        assert!(summary.run_time.is_none());
    }

    #[test]
    fn test_every_example_in_one_bucket_after_run() {
        let mut examples = vec![
            boxed(SpecExample::new(["pass"], || Ok(()))),
            boxed(SpecExample::new(["fail"], || Err(FailureData::new("no")))),
            boxed(SpecExample::new(["panic"], || panic!("oops"))),
            boxed(SpecExample::new(["skipped"], || Ok(()))),
            boxed(SpecExample::new_pending(["pending"])),
        ];
        examples[3].skip();
        let router = FailureRouter::new();
        for example in examples.iter_mut() {
            example.run(&router);
        }

        let s = SuiteSummary::from_examples("suite", &examples, 5, false);
        assert_eq!(
            s.number_of_passed_examples
                + s.number_of_failed_examples
                + s.number_of_pending_examples
                + s.number_of_skipped_examples,
            examples.len()
        );
        assert_eq!(s.number_of_failed_examples, 2);
        assert_eq!(s.number_of_pending_examples, 1);
        assert_eq!(s.number_of_skipped_examples, 1);
        assert!(!s.suite_succeeded);
    }

    #[test]
    fn test_fail_on_pending_flips_verdict() {
        let examples = vec![
            boxed(SpecExample::new(["a"], || Ok(()))),
            boxed(SpecExample::new_pending(["b"])),
        ];

        assert!(SuiteSummary::from_examples("suite", &examples, 2, false).suite_succeeded);
        assert!(!SuiteSummary::from_examples("suite", &examples, 2, true).suite_succeeded);
    }

    #[test]
    fn test_pass_rate() {
        let mut examples = vec![
            boxed(SpecExample::new(["a"], || Ok(()))),
            boxed(SpecExample::new(["b"], || Err(FailureData::new("no")))),
        ];
        let router = FailureRouter::new();
        for example in examples.iter_mut() {
            example.run(&router);
        }

        let summary = SuiteSummary::from_examples("suite", &examples, 2, false);
        assert_eq!(summary.number_of_examples_that_will_be_run, 2);
        assert!((summary.pass_rate() - 50.0).abs() < f64::EPSILON);
    }
}
