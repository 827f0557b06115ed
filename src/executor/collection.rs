//! Example collection
//!
//! Owns a suite's examples from selection through execution, and turns their
//! outcomes into a suite-level verdict.

use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, info};

use super::router::FailureRouter;
use super::selection::{self, Examples};
use crate::config::SuiteConfig;
use crate::errors::CollectionError;
use crate::host::TestHost;
use crate::models::{Example, FailureData, SuiteSummary};
use crate::reporter::Reporter;

/// Orchestrates one suite run
pub struct ExampleCollection {
    host: Box<dyn TestHost>,
    description: String,
    examples: Examples,
    example_count_before_parallelization: usize,
    reporters: Vec<Box<dyn Reporter>>,
    started: Option<(Instant, DateTime<Utc>)>,
    running_example: Option<usize>,
    router: FailureRouter,
    config: SuiteConfig,
}

impl ExampleCollection {
    /// Build a collection and run the selection pipeline over `examples`.
    ///
    /// Fails on an invalid focus pattern or parallel setting, before any
    /// example is touched.
    pub fn new(
        host: Box<dyn TestHost>,
        description: impl Into<String>,
        mut examples: Examples,
        reporters: Vec<Box<dyn Reporter>>,
        config: SuiteConfig,
    ) -> Result<Self, CollectionError> {
        let description = description.into();
        let example_count_before_parallelization = examples.len();

        selection::apply_pipeline(&config, &mut examples)?;

        debug!(
            "Collection '{}' holds {} of {} examples",
            description,
            examples.len(),
            example_count_before_parallelization
        );

        Ok(Self {
            host,
            description,
            examples,
            example_count_before_parallelization,
            reporters,
            started: None,
            running_example: None,
            router: FailureRouter::new(),
            config,
        })
    }

    /// Route out-of-band failures through a router created ahead of time, so
    /// assertion helpers built alongside the examples can hold a handle
    pub fn with_failure_router(mut self, router: FailureRouter) -> Self {
        self.router = router;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Examples this process owns, in run order
    pub fn examples(&self) -> &[Box<dyn Example>] {
        &self.examples
    }

    pub fn example_count_before_parallelization(&self) -> usize {
        self.example_count_before_parallelization
    }

    /// Handle for posting failures to whichever example is running
    pub fn failure_router(&self) -> FailureRouter {
        self.router.clone()
    }

    /// Run every example in order, reporting as it goes.
    ///
    /// The host is told about a failed suite once, after the last report.
    pub fn run(&mut self) {
        self.report_suite_will_begin();

        let mut suite_failed = false;

        for index in 0..self.examples.len() {
            if !self.examples[index].skipped_or_pending() {
                self.run_example(index);
                if self.examples[index].failed() {
                    suite_failed = true;
                }
            } else if self.examples[index].pending() && self.config.fail_on_pending {
                suite_failed = true;
            }

            self.report_example(index);
        }

        self.report_suite_did_end();

        if suite_failed {
            self.host.fail();
        }
    }

    fn run_example(&mut self, index: usize) {
        debug!("Running {}", self.examples[index].concatenated_string());

        self.running_example = Some(index);
        self.router.arm();

        self.examples[index].run(&self.router);

        let undrained = self.router.disarm();
        if !undrained.is_empty() {
            debug!(
                "{} signalled failures left undrained by {}",
                undrained.len(),
                self.examples[index].concatenated_string()
            );
        }
        for failure in undrained {
            self.fail(failure);
        }
        self.running_example = None;
    }

    /// Deliver a failure to the running example, if there is one
    pub fn fail(&mut self, failure: FailureData) {
        match self.running_example {
            Some(index) => self.examples[index].fail(failure),
            None => debug!("No running example for failure: {}", failure),
        }
    }

    /// Counts and verdict computed from the current example states
    pub fn summary(&self) -> SuiteSummary {
        let summary = SuiteSummary::from_examples(
            self.description.clone(),
            &self.examples,
            self.example_count_before_parallelization,
            self.config.fail_on_pending,
        );

        match self.started {
            Some((_, started_at)) => summary.with_started_at(started_at),
            None => summary,
        }
    }

    fn report_suite_will_begin(&mut self) {
        self.started = Some((Instant::now(), Utc::now()));
        let summary = self.summary();

        info!(
            "Suite '{}' will run {} of {} examples (seed {})",
            summary.suite_description,
            summary.number_of_examples_that_will_be_run,
            summary.number_of_examples_before_parallelization,
            self.config.random_seed
        );

        for reporter in self.reporters.iter_mut() {
            reporter.spec_suite_will_begin(&self.config, &summary);
        }
    }

    fn report_example(&mut self, index: usize) {
        let summary = self.examples[index].summary();
        for reporter in self.reporters.iter_mut() {
            reporter.example_did_complete(&summary);
        }
    }

    fn report_suite_did_end(&mut self) {
        let mut summary = self.summary();
        if let Some((start, _)) = self.started {
            summary = summary.with_run_time(start.elapsed());
        }

        info!("{}", summary);

        for reporter in self.reporters.iter_mut() {
            reporter.spec_suite_did_end(&summary);
        }
    }
}
