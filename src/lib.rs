//! specrun - orchestration core for a behavior-driven test runner
//!
//! Owns a suite of examples from selection through execution to the final
//! verdict.
//!
//! ## Features
//!
//! - Seeded, reproducible shuffling of the whole suite
//! - Focus by regex over example descriptions, or by per-example focus flags
//! - Measurement skipping and pending examples (optionally failing the suite)
//! - Static sharding of the ordered suite across parallel processes
//! - Pluggable reporters (console and JSON lines included)
//!
//! ## Usage
//!
//! ```no_run
//! use specrun::{ExampleCollection, FailureLatch, SpecExample, SuiteConfig};
//! use specrun::reporter::ConsoleReporter;
//!
//! let latch = FailureLatch::new();
//! let examples: Vec<Box<dyn specrun::Example>> = vec![
//!     Box::new(SpecExample::new(["Stack", "pushes"], || Ok(()))),
//!     Box::new(SpecExample::new_pending(["Stack", "pops"])),
//! ];
//!
//! let mut collection = ExampleCollection::new(
//!     Box::new(latch.clone()),
//!     "Stack Suite",
//!     examples,
//!     vec![Box::new(ConsoleReporter::stdout())],
//!     SuiteConfig::with_seed(42),
//! )?;
//! collection.run();
//! println!("exit code: {}", latch.exit_code());
//! # Ok::<(), specrun::CollectionError>(())
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod host;
pub mod models;
pub mod reporter;
pub mod utils;

pub use config::SuiteConfig;
pub use errors::CollectionError;
pub use executor::{ExampleCollection, FailureRouter};
pub use host::{FailureLatch, TestHost};
pub use models::{
    ComponentKind, Example, ExampleState, ExampleSummary, FailureData, SpecExample, SuiteSummary,
};
