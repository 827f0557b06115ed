//! Command-line flags
//!
//! Flags a hosting binary can flatten into its own clap parser.

use anyhow::Result;
use clap::Args;

use super::{EnvConfig, SuiteConfig};

/// Suite selection and sharding flags
#[derive(Args, Debug, Clone, Default)]
pub struct SuiteArgs {
    /// Seed used to randomize the example order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Randomize the order of every example
    #[arg(long)]
    pub randomize_all: bool,

    /// Only run examples whose description matches this regex
    #[arg(long)]
    pub focus: Option<String>,

    /// Skip measurement examples
    #[arg(long)]
    pub skip_measurements: bool,

    /// Fail the suite when any example is pending
    #[arg(long)]
    pub fail_on_pending: bool,

    /// Index of this node among parallel nodes (0-based)
    #[arg(long)]
    pub parallel_node: Option<usize>,

    /// Number of parallel nodes
    #[arg(long)]
    pub parallel_total: Option<usize>,

    /// Path to a YAML or JSON configuration file
    #[arg(long)]
    pub config: Option<String>,
}

impl SuiteArgs {
    /// Resolve defaults, then the config file, then `SPECRUN_*`, then flags
    pub fn resolve(&self) -> Result<SuiteConfig> {
        let env = EnvConfig::load();

        let base = match self.config.as_ref().or(env.config_file.as_ref()) {
            Some(path) => SuiteConfig::load(path)?,
            None => SuiteConfig::default(),
        };

        Ok(self.apply(base.apply_env(&env)))
    }

    /// Overlay the flags that were given on the command line
    pub fn apply(&self, mut config: SuiteConfig) -> SuiteConfig {
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if self.randomize_all {
            config.randomize_all_specs = true;
        }
        if let Some(focus) = &self.focus {
            config.focus_string = focus.clone();
        }
        if self.skip_measurements {
            config.skip_measurements = true;
        }
        if self.fail_on_pending {
            config.fail_on_pending = true;
        }
        if let Some(node) = self.parallel_node {
            config.parallel_node = node;
        }
        if let Some(total) = self.parallel_total {
            config.parallel_total = total;
        }
        config
    }
}
