//! Console reporter
//!
//! Human-readable progress lines, coloured with ANSI escapes by default.

use std::io::{self, Write};
use tracing::warn;

use super::Reporter;
use crate::config::SuiteConfig;
use crate::models::{ExampleState, ExampleSummary, SuiteSummary};

pub struct ConsoleReporter<W: Write> {
    out: W,
    colorize: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.colorize {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    // Padded before painting so escape codes don't eat into the column width
    fn state_label(&self, state: ExampleState) -> String {
        let label = format!("{:<12}", format!("{} {}", state.symbol(), state));
        let code = match state {
            ExampleState::Passed => "32",
            ExampleState::Pending | ExampleState::Skipped => "33",
            ExampleState::NotRun => "0",
            ExampleState::Failed | ExampleState::Panicked | ExampleState::TimedOut => "31",
        };
        self.paint(&label, code)
    }

    fn format_example(&self, summary: &ExampleSummary) -> String {
        let mut line = format!(
            "{} {} [{}ms]",
            self.state_label(summary.state),
            summary.description(),
            summary.run_time_ms
        );
        if let Some(failure) = &summary.failure {
            line.push_str(&format!("\n    {failure}"));
        }
        line
    }

    fn format_begin(&self, config: &SuiteConfig, summary: &SuiteSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("Running Suite: {}\n", summary.suite_description));
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        output.push_str(&format!("Random Seed: {}", config.random_seed));
        if config.randomize_all_specs {
            output.push_str(" - will randomize all specs");
        }
        output.push('\n');
        if config.is_parallel() {
            output.push_str(&format!(
                "Parallel node {} of {}\n",
                config.parallel_node + 1,
                config.parallel_total
            ));
        }
        output.push_str(&format!(
            "Will run {} of {} specs",
            summary.number_of_examples_that_will_be_run,
            summary.number_of_examples_before_parallelization
        ));
        output
    }

    fn format_end(&self, summary: &SuiteSummary) -> String {
        let verdict = if summary.suite_succeeded {
            self.paint("SUCCESS!", "32")
        } else {
            self.paint("FAIL!", "31")
        };
        let run_time = summary.run_time.unwrap_or_default();

        format!(
            "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
             Ran {} of {} Specs in {:.3} seconds\n\
             {} -- {} Passed | {} Failed | {} Pending | {} Skipped",
            summary.number_of_passed_examples + summary.number_of_failed_examples,
            summary.number_of_examples_before_parallelization,
            run_time.as_secs_f64(),
            verdict,
            summary.number_of_passed_examples,
            summary.number_of_failed_examples,
            summary.number_of_pending_examples,
            summary.number_of_skipped_examples
        )
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("Console reporter failed to write: {}", e);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn spec_suite_will_begin(&mut self, config: &SuiteConfig, summary: &SuiteSummary) {
        let text = self.format_begin(config, summary);
        self.emit(&text);
    }

    fn example_did_complete(&mut self, summary: &ExampleSummary) {
        let text = self.format_example(summary);
        self.emit(&text);
    }

    fn spec_suite_did_end(&mut self, summary: &SuiteSummary) {
        let text = self.format_end(summary);
        self.emit(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureData;
    use std::time::Duration;

    fn summary(succeeded: bool) -> SuiteSummary {
        SuiteSummary {
            suite_description: "Parser Suite".to_string(),
            suite_succeeded: succeeded,
            number_of_examples_before_parallelization: 6,
            number_of_total_examples: 3,
            number_of_examples_that_will_be_run: 3,
            number_of_pending_examples: 0,
            number_of_skipped_examples: 0,
            number_of_passed_examples: 2,
            number_of_failed_examples: 1,
            started_at: None,
            run_time: Some(Duration::from_millis(1500)),
        }
    }

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_begin_banner() {
        let mut reporter = ConsoleReporter::new(Vec::new()).no_color();
        let config = SuiteConfig {
            randomize_all_specs: true,
            parallel_node: 1,
            parallel_total: 2,
            ..SuiteConfig::with_seed(42)
        };

        reporter.spec_suite_will_begin(&config, &summary(true));
        let text = output(reporter);

        assert!(text.contains("Running Suite: Parser Suite"));
        assert!(text.contains("Random Seed: 42 - will randomize all specs"));
        assert!(text.contains("Parallel node 2 of 2"));
        assert!(text.contains("Will run 3 of 6 specs"));
    }

    #[test]
    fn test_example_line_with_failure() {
        let mut reporter = ConsoleReporter::new(Vec::new()).no_color();
        let example = ExampleSummary {
            component_texts: vec!["Parser".to_string(), "rejects junk".to_string()],
            state: ExampleState::Failed,
            run_time_ms: 12,
            failure: Some(FailureData::new("expected error").with_location("parser.rs:10")),
            is_measurement: false,
        };

        reporter.example_did_complete(&example);
        let text = output(reporter);

        assert!(text.contains("✗ FAIL"));
        assert!(text.contains("Parser rejects junk [12ms]"));
        assert!(text.contains("expected error (parser.rs:10)"));
    }

    #[test]
    fn test_end_verdict() {
        let mut reporter = ConsoleReporter::new(Vec::new()).no_color();
        reporter.spec_suite_did_end(&summary(false));
        let text = output(reporter);

        assert!(text.contains("Ran 3 of 6 Specs in 1.500 seconds"));
        assert!(text.contains("FAIL! -- 2 Passed | 1 Failed | 0 Pending | 0 Skipped"));
    }

    #[test]
    fn test_color_codes() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.spec_suite_did_end(&summary(true));
        assert!(output(reporter).contains("\x1b[32mSUCCESS!\x1b[0m"));
    }

    #[test]
    fn test_example_columns_match_with_and_without_color() {
        let example = ExampleSummary {
            component_texts: vec!["Parser".to_string(), "reads".to_string()],
            state: ExampleState::Passed,
            run_time_ms: 3,
            failure: None,
            is_measurement: false,
        };

        let mut plain = ConsoleReporter::new(Vec::new()).no_color();
        plain.example_did_complete(&example);
        let mut colored = ConsoleReporter::new(Vec::new());
        colored.example_did_complete(&example);

        let stripped = output(colored).replace("\x1b[32m", "").replace("\x1b[0m", "");
        assert_eq!(stripped, output(plain));
    }
}
