//! Collection construction errors

use thiserror::Error;

/// Configuration problems detected before any example runs
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Invalid focus pattern '{pattern}': {source}")]
    InvalidFocusPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Parallel total must be at least 1, got {0}")]
    InvalidParallelTotal(usize),

    #[error("Parallel node {node} is out of range for {total} nodes")]
    InvalidParallelNode { node: usize, total: usize },
}
