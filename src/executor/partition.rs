//! Shard partitioning
//!
//! Splits an ordered example set into contiguous, balanced index ranges, one
//! per parallel node.

use std::ops::Range;

/// Contiguous slice `[start, start + count)` owned by one node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexRange {
    pub start: usize,
    pub count: usize,
}

impl IndexRange {
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Compute the range of `total_examples` owned by node `shard_index`.
///
/// The first `total_examples % shard_count` nodes get one extra example.
/// Callers validate `shard_count >= 1` and `shard_index < shard_count`; out of
/// range inputs yield an empty range at the end of the set.
pub fn parallelized_index_range(
    total_examples: usize,
    shard_count: usize,
    shard_index: usize,
) -> IndexRange {
    if shard_count == 0 || shard_index >= shard_count {
        return IndexRange {
            start: total_examples,
            count: 0,
        };
    }

    let base = total_examples / shard_count;
    let remainder = total_examples % shard_count;

    let count = if shard_index < remainder { base + 1 } else { base };
    let start = shard_index * base + shard_index.min(remainder);

    IndexRange { start, count }
}
