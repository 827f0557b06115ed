//! JSON lines reporter
//!
//! Writes one JSON object per lifecycle event, tagged by `event`.

use serde::Serialize;
use std::io::Write;
use tracing::warn;

use super::Reporter;
use crate::config::SuiteConfig;
use crate::models::{ExampleSummary, SuiteSummary};

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    SuiteWillBegin {
        config: &'a SuiteConfig,
        summary: &'a SuiteSummary,
    },
    ExampleDidComplete {
        example: &'a ExampleSummary,
    },
    SuiteDidEnd {
        summary: &'a SuiteSummary,
    },
}

pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &Event<'_>) {
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));

        if let Err(e) = result {
            warn!("JSON reporter failed to write event: {}", e);
        }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn spec_suite_will_begin(&mut self, config: &SuiteConfig, summary: &SuiteSummary) {
        self.emit(&Event::SuiteWillBegin { config, summary });
    }

    fn example_did_complete(&mut self, summary: &ExampleSummary) {
        self.emit(&Event::ExampleDidComplete { example: summary });
    }

    fn spec_suite_did_end(&mut self, summary: &SuiteSummary) {
        self.emit(&Event::SuiteDidEnd { summary });
    }
}
