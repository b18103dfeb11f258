/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub shaft: ShaftConfig,
    pub simulator: SimulatorConfig,
}

/// Travel and autorun pacing, all in milliseconds.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub base_travel_ms: u64,
    pub per_floor_ms: u64,
    pub settle_buffer_ms: u64,
    pub autorun_gap_ms: u64,
    pub autorun_min_interval_ms: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ShaftConfig {
    pub floor_height: u32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub tick_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl Config {
    /// Rejects values that would stall the simulator. A zero autorun
    /// interval lets patrol steps fall due at the instant they are scheduled.
    pub fn validate(&self) -> Result<(), String> {
        if self.timing.autorun_min_interval_ms == 0 {
            return Err("timing.autorun_min_interval_ms must be at least 1".to_string());
        }
        if self.simulator.tick_ms == 0 {
            return Err("simulator.tick_ms must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            base_travel_ms: 1150,
            per_floor_ms: 550,
            settle_buffer_ms: 120,
            autorun_gap_ms: 900,
            autorun_min_interval_ms: 2600,
        }
    }
}

impl TimingConfig {
    /// Linear travel model: a fixed start/stop cost plus a per-floor cost.
    pub fn travel_time(&self, floors: u8) -> Duration {
        Duration::from_millis(self.base_travel_ms + self.per_floor_ms * u64::from(floors))
    }

    pub fn settle_delay(&self, travel: Duration) -> Duration {
        travel + Duration::from_millis(self.settle_buffer_ms)
    }

    /// Delay before the next autorun step. Never shorter than the minimum
    /// interval, even when the last step did not move the car, and never zero.
    pub fn autorun_delay(&self, travel: Duration) -> Duration {
        let after_travel = travel + Duration::from_millis(self.autorun_gap_ms);
        let min_interval = Duration::from_millis(self.autorun_min_interval_ms.max(1));
        after_travel.max(min_interval)
    }
}

impl Default for ShaftConfig {
    fn default() -> Self {
        ShaftConfig { floor_height: 104 }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig { tick_ms: 50 }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&config_str).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|reason| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timing.base_travel_ms, 1150);
        assert_eq!(config.shaft.floor_height, 104);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[timing]\nper_floor_ms = 10\n").unwrap();
        assert_eq!(config.timing.per_floor_ms, 10);
        assert_eq!(config.timing.settle_buffer_ms, 120);
        assert_eq!(config.simulator.tick_ms, 50);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = parse_config(include_str!("../config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_travel_time_is_linear_in_floors() {
        let timing = TimingConfig::default();
        assert_eq!(timing.travel_time(1), Duration::from_millis(1700));
        assert_eq!(timing.travel_time(2), Duration::from_millis(2250));
        assert_eq!(timing.travel_time(4), Duration::from_millis(3350));
    }

    #[test]
    fn test_autorun_delay_has_a_floor() {
        let timing = TimingConfig::default();
        // 1700 + 900 = 2600, exactly the minimum
        assert_eq!(timing.autorun_delay(timing.travel_time(1)), Duration::from_millis(2600));
        assert_eq!(timing.autorun_delay(Duration::ZERO), Duration::from_millis(2600));
        assert_eq!(timing.autorun_delay(timing.travel_time(3)), Duration::from_millis(3700));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_autorun_interval_is_rejected() {
        let config = parse_config("[timing]\nautorun_min_interval_ms = 0\n").unwrap();
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let config = parse_config("[simulator]\ntick_ms = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_reports_invalid_values() {
        let path = std::env::temp_dir().join(format!("elevator-sim-zero-{}.toml", std::process::id()));
        fs::write(&path, "[timing]\nautorun_min_interval_ms = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_autorun_delay_never_zero() {
        let timing = TimingConfig {
            base_travel_ms: 0,
            per_floor_ms: 0,
            settle_buffer_ms: 0,
            autorun_gap_ms: 0,
            autorun_min_interval_ms: 0,
        };
        assert_eq!(timing.autorun_delay(Duration::ZERO), Duration::from_millis(1));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(parse_config("[timing\nbase_travel_ms = ").is_err());
    }
}
