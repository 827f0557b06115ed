//! Example selection pipeline
//!
//! Runs once when a collection is built: randomization, focus, measurement
//! skipping, then parallel trimming. Each stage sees the output of the one
//! before it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use tracing::debug;

use super::partition::parallelized_index_range;
use crate::config::SuiteConfig;
use crate::errors::CollectionError;
use crate::models::{ComponentKind, Example};

pub type Examples = Vec<Box<dyn Example>>;

/// Apply every configured stage to `examples`
pub fn apply_pipeline(
    config: &SuiteConfig,
    examples: &mut Examples,
) -> Result<(), CollectionError> {
    config.validate()?;
    let focus = compile_focus(&config.focus_string)?;

    if config.randomize_all_specs {
        shuffle(examples, config.random_seed);
    }

    match &focus {
        Some(filter) => apply_regex_focus(examples, filter),
        None => apply_programmatic_focus(examples),
    }

    if config.skip_measurements {
        skip_measurements(examples);
    }

    if config.is_parallel() {
        trim_for_parallelization(examples, config.parallel_total, config.parallel_node);
    }

    Ok(())
}

/// Compile the focus pattern; an empty pattern disables pattern focus
pub fn compile_focus(pattern: &str) -> Result<Option<Regex>, CollectionError> {
    if pattern.is_empty() {
        return Ok(None);
    }

    Regex::new(pattern)
        .map(Some)
        .map_err(|source| CollectionError::InvalidFocusPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Sort into canonical description order, then permute with a seeded RNG
pub fn shuffle(examples: &mut Examples, seed: u64) {
    examples.sort_by_cached_key(|e| e.concatenated_string());

    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);

    debug!("Shuffled {} examples with seed {}", examples.len(), seed);
}

/// Skip every example whose description does not match `filter`
pub fn apply_regex_focus(examples: &mut Examples, filter: &Regex) {
    let mut skipped = 0;
    for example in examples.iter_mut() {
        if !filter.is_match(&example.concatenated_string()) {
            example.skip();
            skipped += 1;
        }
    }

    debug!("Focus pattern '{}' skipped {} examples", filter, skipped);
}

/// When any example is focused, skip every example that is not
pub fn apply_programmatic_focus(examples: &mut Examples) {
    if !examples.iter().any(|e| e.focused()) {
        return;
    }

    let mut skipped = 0;
    for example in examples.iter_mut().filter(|e| !e.focused()) {
        example.skip();
        skipped += 1;
    }

    debug!("Programmatic focus skipped {} examples", skipped);
}

pub fn skip_measurements(examples: &mut Examples) {
    for example in examples.iter_mut() {
        if example.subject_component_type() == ComponentKind::Measure {
            example.skip();
        }
    }
}

/// Keep only this node's contiguous slice; the rest are dropped, not skipped
pub fn trim_for_parallelization(
    examples: &mut Examples,
    parallel_total: usize,
    parallel_node: usize,
) {
    let before = examples.len();
    let range = parallelized_index_range(before, parallel_total, parallel_node);

    examples.truncate(range.end());
    *examples = examples.split_off(range.start);

    debug!(
        "Node {}/{} kept examples {:?} of {}",
        parallel_node,
        parallel_total,
        range.as_range(),
        before
    );
}
