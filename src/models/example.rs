//! Example models
//!
//! Defines the example contract consumed by the collection, the outcome
//! states an example moves through, and a closure-backed example.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::executor::FailureRouter;

/// Outcome state of a single example
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleState {
    #[default]
    NotRun,
    Passed,
    Failed,
    Pending,
    Skipped,
    Panicked,
    TimedOut,
}

impl ExampleState {
    /// Failed, Panicked and TimedOut all count as failures
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ExampleState::Failed | ExampleState::Panicked | ExampleState::TimedOut
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ExampleState::NotRun => " ",
            ExampleState::Passed => "✓",
            ExampleState::Failed => "✗",
            ExampleState::Pending => "P",
            ExampleState::Skipped => "S",
            ExampleState::Panicked => "!",
            ExampleState::TimedOut => "⏱",
        }
    }
}

impl fmt::Display for ExampleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleState::NotRun => write!(f, "NOT RUN"),
            ExampleState::Passed => write!(f, "PASS"),
            ExampleState::Failed => write!(f, "FAIL"),
            ExampleState::Pending => write!(f, "PENDING"),
            ExampleState::Skipped => write!(f, "SKIP"),
            ExampleState::Panicked => write!(f, "PANIC"),
            ExampleState::TimedOut => write!(f, "TIMEOUT"),
        }
    }
}

/// Kind of the component that forms the subject of an example
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    #[default]
    Normal,
    Pending,
    Measure,
}

/// A recorded failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureData {
    pub message: String,
    pub location: Option<String>,
    pub forwarded_panic: Option<String>,
}

impl FailureData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            forwarded_panic: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let text = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self {
            message: "Test panicked".to_string(),
            location: None,
            forwarded_panic: Some(text),
        }
    }
}

impl fmt::Display for FailureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(panic) = &self.forwarded_panic {
            write!(f, ": {panic}")?;
        }
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

/// Immutable result of one example, handed to reporters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExampleSummary {
    pub component_texts: Vec<String>,
    pub state: ExampleState,
    pub run_time_ms: u64,
    pub failure: Option<FailureData>,
    pub is_measurement: bool,
}

impl ExampleSummary {
    pub fn description(&self) -> String {
        self.component_texts.join(" ")
    }
}

impl fmt::Display for ExampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.state.symbol(),
            self.description(),
            self.run_time_ms
        )?;
        if let Some(failure) = &self.failure {
            write!(f, " - {failure}")?;
        }
        Ok(())
    }
}

/// Contract every runnable example fulfils.
///
/// The collection only ever mutates an example through `skip`, `run` and
/// `fail`; everything else is a read-only query.
pub trait Example {
    /// Mark as skipped. Idempotent and never runs the body.
    fn skip(&mut self);

    /// Execute the example, leaving it in exactly one terminal state.
    ///
    /// Failures posted to `failures` while the body executes belong to this
    /// example and must be drained before the final state is chosen.
    fn run(&mut self, failures: &FailureRouter);

    /// Record a failure reported from outside the example's own call stack.
    /// Has no effect once the example is in a terminal state.
    fn fail(&mut self, failure: FailureData);

    /// Full hierarchical description joined into one string.
    fn concatenated_string(&self) -> String;

    fn focused(&self) -> bool;

    fn state(&self) -> ExampleState;

    fn subject_component_type(&self) -> ComponentKind;

    fn summary(&self) -> ExampleSummary;

    fn pending(&self) -> bool {
        self.state() == ExampleState::Pending
    }

    fn skipped_or_pending(&self) -> bool {
        matches!(self.state(), ExampleState::Skipped | ExampleState::Pending)
    }

    fn failed(&self) -> bool {
        self.state().is_failure()
    }
}

type Body = Box<dyn FnMut() -> Result<(), FailureData>>;

/// Example backed by a closure
pub struct SpecExample {
    component_texts: Vec<String>,
    kind: ComponentKind,
    focused: bool,
    body: Body,
    timeout: Option<Duration>,
    state: ExampleState,
    failure: Option<FailureData>,
    run_time: Duration,
}

impl SpecExample {
    /// Create a normal example from its hierarchy of texts and a body
    pub fn new<I, S, F>(texts: I, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut() -> Result<(), FailureData> + 'static,
    {
        Self {
            component_texts: texts.into_iter().map(Into::into).collect(),
            kind: ComponentKind::Normal,
            focused: false,
            body: Box::new(body),
            timeout: None,
            state: ExampleState::NotRun,
            failure: None,
            run_time: Duration::ZERO,
        }
    }

    /// Create a pending example. It is never executed.
    pub fn new_pending<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut example = Self::new(texts, || Ok(()));
        example.kind = ComponentKind::Pending;
        example.state = ExampleState::Pending;
        example
    }

    /// Create a measurement example
    pub fn new_measure<I, S, F>(texts: I, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut() -> Result<(), FailureData> + 'static,
    {
        let mut example = Self::new(texts, body);
        example.kind = ComponentKind::Measure;
        example
    }

    pub fn focus(mut self) -> Self {
        self.focused = true;
        self
    }

    /// Mark as timed out when the body runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn failure(&self) -> Option<&FailureData> {
        self.failure.as_ref()
    }

    pub fn run_time(&self) -> Duration {
        self.run_time
    }
}

impl Example for SpecExample {
    fn skip(&mut self) {
        self.state = ExampleState::Skipped;
    }

    fn run(&mut self, failures: &FailureRouter) {
        if self.skipped_or_pending() {
            return;
        }

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.body)()));
        self.run_time = start.elapsed();

        // Still NotRun here, so signalled failures land through fail()
        for failure in failures.drain() {
            self.fail(failure);
        }

        self.state = match outcome {
            Err(payload) => {
                self.failure = Some(FailureData::from_panic(payload));
                ExampleState::Panicked
            }
            Ok(Err(failure)) => {
                self.failure.get_or_insert(failure);
                ExampleState::Failed
            }
            Ok(Ok(())) if self.failure.is_some() => ExampleState::Failed,
            Ok(Ok(())) => match self.timeout {
                Some(limit) if self.run_time > limit => {
                    self.failure = Some(FailureData::new(format!(
                        "Timed out after {}ms",
                        limit.as_millis()
                    )));
                    ExampleState::TimedOut
                }
                _ => ExampleState::Passed,
            },
        };
    }

    fn fail(&mut self, failure: FailureData) {
        if self.state == ExampleState::NotRun {
            self.failure.get_or_insert(failure);
        }
    }

    fn concatenated_string(&self) -> String {
        self.component_texts.join(" ")
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn state(&self) -> ExampleState {
        self.state
    }

    fn subject_component_type(&self) -> ComponentKind {
        self.kind
    }

    fn summary(&self) -> ExampleSummary {
        ExampleSummary {
            component_texts: self.component_texts.clone(),
            state: self.state,
            run_time_ms: self.run_time.as_millis() as u64,
            failure: self.failure.clone(),
            is_measurement: self.kind == ComponentKind::Measure,
        }
    }
}

impl fmt::Debug for SpecExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecExample")
            .field("component_texts", &self.component_texts)
            .field("kind", &self.kind)
            .field("focused", &self.focused)
            .field("state", &self.state)
            .finish()
    }
}
