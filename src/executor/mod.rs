//! Suite execution engine
//!
//! Selection, sharding and the sequential execution loop.

mod collection;
mod partition;
mod router;
pub mod selection;

pub use collection::ExampleCollection;
pub use partition::{parallelized_index_range, IndexRange};
pub use router::FailureRouter;
pub use selection::Examples;
