//! Reporters
//!
//! Sinks notified of suite and example lifecycle events. All calls are made
//! synchronously, in registration order, from the execution loop.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use crate::config::SuiteConfig;
use crate::models::{ExampleSummary, SuiteSummary};

/// Receives lifecycle events from an example collection
pub trait Reporter {
    /// Called once before any example runs
    fn spec_suite_will_begin(&mut self, config: &SuiteConfig, summary: &SuiteSummary);

    /// Called after every example, whether it ran or was skipped
    fn example_did_complete(&mut self, summary: &ExampleSummary);

    /// Called once with the final summary, including run time
    fn spec_suite_did_end(&mut self, summary: &SuiteSummary);
}
