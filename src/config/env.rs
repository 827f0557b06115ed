//! Environment variable configuration
//!
//! `SPECRUN_*` variables override the config file and are in turn overridden
//! by command-line flags.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "SPECRUN";

/// Overrides read from `SPECRUN_*` variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Seed from SPECRUN_SEED
    pub seed: Option<u64>,
    /// Randomize all from SPECRUN_RANDOMIZE_ALL
    pub randomize_all: Option<bool>,
    /// Focus pattern from SPECRUN_FOCUS
    pub focus: Option<String>,
    /// Skip measurements from SPECRUN_SKIP_MEASUREMENTS
    pub skip_measurements: Option<bool>,
    /// Fail on pending from SPECRUN_FAIL_ON_PENDING
    pub fail_on_pending: Option<bool>,
    /// Node index from SPECRUN_PARALLEL_NODE
    pub parallel_node: Option<usize>,
    /// Node count from SPECRUN_PARALLEL_TOTAL
    pub parallel_total: Option<usize>,
    /// Config file from SPECRUN_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            seed: var("SEED").and_then(|v| parse_number(&v)),
            randomize_all: var("RANDOMIZE_ALL").map(|v| parse_switch(&v)),
            focus: var("FOCUS"),
            skip_measurements: var("SKIP_MEASUREMENTS").map(|v| parse_switch(&v)),
            fail_on_pending: var("FAIL_ON_PENDING").map(|v| parse_switch(&v)),
            parallel_node: var("PARALLEL_NODE").and_then(|v| parse_number(&v)),
            parallel_total: var("PARALLEL_TOTAL").and_then(|v| parse_number(&v)),
            config_file: var("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.seed.is_some()
            || self.randomize_all.is_some()
            || self.focus.is_some()
            || self.skip_measurements.is_some()
            || self.fail_on_pending.is_some()
            || self.parallel_node.is_some()
            || self.parallel_total.is_some()
            || self.config_file.is_some()
    }
}

fn var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Unparseable numbers are ignored rather than reset to zero
fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Anything other than a recognised "on" spelling reads as false
fn parse_switch(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.seed.is_none());
        assert!(config.focus.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("TRUE"));
        assert!(parse_switch(" 1 "));
        assert!(parse_switch("on"));
        assert!(!parse_switch("0"));
        assert!(!parse_switch("nope"));
    }

    #[test]
    fn test_parse_number_ignores_junk() {
        assert_eq!(parse_number::<usize>(" 3 "), Some(3));
        assert_eq!(parse_number::<u64>("seven"), None);
    }

    // Every variable is set in this one test; tests run on parallel threads
    // and share the process environment.
    #[test]
    fn test_load_reads_every_variable() {
        let vars = [
            ("SPECRUN_SEED", "1234"),
            ("SPECRUN_RANDOMIZE_ALL", "true"),
            ("SPECRUN_FOCUS", "^Parser"),
            ("SPECRUN_SKIP_MEASUREMENTS", "yes"),
            ("SPECRUN_FAIL_ON_PENDING", "false"),
            ("SPECRUN_PARALLEL_NODE", "1"),
            ("SPECRUN_PARALLEL_TOTAL", "3"),
            ("SPECRUN_CONFIG", "suite.yaml"),
        ];
        for (key, value) in vars {
            env::set_var(key, value);
        }

        let config = EnvConfig::load();

        for (key, _) in vars {
            env::remove_var(key);
        }

        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.randomize_all, Some(true));
        assert_eq!(config.focus.as_deref(), Some("^Parser"));
        assert_eq!(config.skip_measurements, Some(true));
        assert_eq!(config.fail_on_pending, Some(false));
        assert_eq!(config.parallel_node, Some(1));
        assert_eq!(config.parallel_total, Some(3));
        assert_eq!(config.config_file.as_deref(), Some("suite.yaml"));
        assert!(config.has_any());
    }
}
