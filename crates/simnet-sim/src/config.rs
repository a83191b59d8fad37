use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::SimError;

pub const DEFAULT_OUTPUT: &str = "simnet_data.csv";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Optional settings as read from TOML or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfigInput {
    pub output: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub seed: Option<u64>,
    pub max_cycles: Option<u64>,
}

/// Resolved run settings. `Default` is the fixed stock behavior: log to
/// `simnet_data.csv` every 5 seconds with a fresh seed until interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub output: PathBuf,
    pub interval: Duration,
    pub seed: Option<u64>,
    pub max_cycles: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            interval: DEFAULT_INTERVAL,
            seed: None,
            max_cycles: None,
        }
    }
}

impl SimConfigInput {
    pub fn from_toml_str(input: &str) -> Result<Self, SimError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(input).map_err(|e| SimError::Config(format!("invalid config TOML: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SimError::Config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Fields set in `other` win.
    pub fn overlay(self, other: SimConfigInput) -> Self {
        Self {
            output: other.output.or(self.output),
            interval_secs: other.interval_secs.or(self.interval_secs),
            seed: other.seed.or(self.seed),
            max_cycles: other.max_cycles.or(self.max_cycles),
        }
    }

    pub fn resolve(self) -> Result<SimConfig, SimError> {
        let defaults = SimConfig::default();

        let interval = match self.interval_secs {
            Some(0) => return Err(SimError::Config("interval_secs must be at least 1".into())),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.interval,
        };
        if self.max_cycles == Some(0) {
            return Err(SimError::Config("max_cycles must be at least 1".into()));
        }
        let output = match self.output {
            Some(p) if p.as_os_str().is_empty() => {
                return Err(SimError::Config("output path is empty".into()))
            }
            Some(p) => p,
            None => defaults.output,
        };

        Ok(SimConfig {
            output,
            interval,
            seed: self.seed,
            max_cycles: self.max_cycles,
        })
    }
}

impl SimConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, SimError> {
        SimConfigInput::from_toml_str(input)?.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_stock_settings() {
        let cfg = SimConfig::from_toml_str("  \n").unwrap();
        assert_eq!(cfg, SimConfig::default());
        assert_eq!(cfg.output, PathBuf::from("simnet_data.csv"));
        assert_eq!(cfg.interval, Duration::from_secs(5));
        assert!(cfg.seed.is_none());
        assert!(cfg.max_cycles.is_none());
    }

    #[test]
    fn parse_toml_config_basic() {
        let toml = r#"
            output = "/tmp/run.csv"
            interval_secs = 2
            seed = 42
            max_cycles = 10
        "#;
        let cfg = SimConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.output, PathBuf::from("/tmp/run.csv"));
        assert_eq!(cfg.interval, Duration::from_secs(2));
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.max_cycles, Some(10));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = SimConfig::from_toml_str("interval_secs = 0").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn zero_cycle_limit_rejected() {
        assert!(SimConfig::from_toml_str("max_cycles = 0").is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = SimConfig::from_toml_str("interval = 3").unwrap_err();
        assert!(err.to_string().contains("invalid config TOML"));
    }

    #[test]
    fn overlay_prefers_later_values() {
        let file = SimConfigInput::from_toml_str("seed = 1\ninterval_secs = 9").unwrap();
        let cli = SimConfigInput {
            seed: Some(2),
            ..Default::default()
        };
        let cfg = file.overlay(cli).resolve().unwrap();
        assert_eq!(cfg.seed, Some(2));
        assert_eq!(cfg.interval, Duration::from_secs(9));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simnet.toml");
        std::fs::write(&path, "max_cycles = 3\n").unwrap();
        let cfg = SimConfigInput::from_path(&path).unwrap().resolve().unwrap();
        assert_eq!(cfg.max_cycles, Some(3));

        assert!(SimConfigInput::from_path(dir.path().join("missing.toml")).is_err());
    }
}
