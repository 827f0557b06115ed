//! Data models for suite orchestration
//!
//! Examples, their outcome states, and suite-level summaries.

mod example;
mod summary;

pub use example::{ComponentKind, Example, ExampleState, ExampleSummary, FailureData, SpecExample};
pub use summary::SuiteSummary;
