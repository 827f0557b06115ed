//! Configuration module
//!
//! Resolves the suite configuration from defaults, a config file, the
//! environment and command-line flags. The resolved value is handed to the
//! collection once and never changed afterwards.

mod env;
mod flags;

pub use env::EnvConfig;
pub use flags::SuiteArgs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CollectionError;

/// Resolved configuration for one suite run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Seed for the example shuffle
    pub random_seed: u64,

    /// Shuffle every example instead of keeping declaration order
    pub randomize_all_specs: bool,

    /// Regular expression matched against each example's description.
    /// Empty disables pattern focus.
    pub focus_string: String,

    /// Skip every measurement example
    pub skip_measurements: bool,

    /// Count pending examples as a suite failure
    pub fail_on_pending: bool,

    /// Index of this process among the parallel nodes, starting at 0
    pub parallel_node: usize,

    /// Number of parallel nodes sharing the suite
    pub parallel_total: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            random_seed: default_seed(),
            randomize_all_specs: false,
            focus_string: String::new(),
            skip_measurements: false,
            fail_on_pending: false,
            parallel_node: 0,
            parallel_total: 1,
        }
    }
}

fn default_seed() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

impl SuiteConfig {
    /// Defaults with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            random_seed: seed,
            ..Self::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if is_yaml(path.as_ref()) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Overlay any `SPECRUN_*` environment variables
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(seed) = env.seed {
            self.random_seed = seed;
        }
        if let Some(randomize) = env.randomize_all {
            self.randomize_all_specs = randomize;
        }
        if let Some(focus) = &env.focus {
            self.focus_string = focus.clone();
        }
        if let Some(skip) = env.skip_measurements {
            self.skip_measurements = skip;
        }
        if let Some(fail) = env.fail_on_pending {
            self.fail_on_pending = fail;
        }
        if let Some(node) = env.parallel_node {
            self.parallel_node = node;
        }
        if let Some(total) = env.parallel_total {
            self.parallel_total = total;
        }
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel_total > 1
    }

    /// Check the parallel settings
    pub fn validate(&self) -> std::result::Result<(), CollectionError> {
        if self.parallel_total == 0 {
            return Err(CollectionError::InvalidParallelTotal(self.parallel_total));
        }
        if self.parallel_node >= self.parallel_total {
            return Err(CollectionError::InvalidParallelNode {
                node: self.parallel_node,
                total: self.parallel_total,
            });
        }
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
