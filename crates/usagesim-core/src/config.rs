//! TOML-based simulation configuration.
//!
//! Covers everything the driver needs for one run:
//! - Date range and weekend exclusion
//! - The daily activity hour window
//! - Tier and plan percentage mixes
//! - Per-tier metric bounds feeding the plan table
//! - Times-started range and an optional seed
//!
//! Configuration is stored at `~/.config/usagesim/config.toml`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{day_span, weeks_in};
use crate::error::ConfigError;
use crate::hourly::HourWindow;
use crate::plan::{MetricBounds, TierBounds, UsageBounds};
use crate::simulate::{PlanMix, TierMix};

/// Returns `~/.config/usagesim[-dev]/` based on USAGESIM_ENV.
///
/// Set USAGESIM_ENV=dev to use a development data directory.
///
/// # Errors
///
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("USAGESIM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("usagesim-dev")
    } else {
        base_dir.join("usagesim")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Date range configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatesConfig {
    #[serde(default = "default_start_date")]
    pub start: NaiveDate,
    #[serde(default = "default_end_date")]
    pub end: NaiveDate,
    #[serde(default = "default_true")]
    pub exclude_weekends: bool,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            start: default_start_date(),
            end: default_end_date(),
            exclude_weekends: true,
        }
    }
}

/// Daily activity hour window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursConfig {
    #[serde(default = "default_start_hour")]
    pub start: u8,
    #[serde(default = "default_end_hour")]
    pub end: u8,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self { start: 8, end: 17 }
    }
}

/// Times-started range for the synthesized records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_min_times_started")]
    pub min_times_started: u32,
    #[serde(default = "default_max_times_started")]
    pub max_times_started: u32,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            min_times_started: 1,
            max_times_started: 6,
        }
    }
}

/// Simulation configuration.
///
/// Serialized to/from TOML at `~/.config/usagesim/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for reproducible runs; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default)]
    pub tiers: TierMix,
    #[serde(default)]
    pub plans: PlanMix,
    #[serde(default = "default_bounds")]
    pub bounds: UsageBounds,
    #[serde(default)]
    pub activity: ActivityConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dates: DatesConfig::default(),
            hours: HoursConfig::default(),
            tiers: TierMix::default(),
            plans: PlanMix::default(),
            bounds: default_bounds(),
            activity: ActivityConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default on-disk location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from the given path, or fall back to the default location, or to
    /// built-in defaults when no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Number of plan weeks covering the configured date range.
    pub fn num_weeks(&self) -> u32 {
        weeks_in(day_span(self.dates.start, self.dates.end))
    }

    /// 1-based week at which the flatten plan levels off.
    pub fn flatten_week(&self, num_weeks: u32) -> u32 {
        (num_weeks as f64 * self.plans.flatten_at / 100.0).round() as u32
    }

    /// The configured activity window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CoreError::InvalidParameter`] for bad hour
    /// bounds; [`validate`](Self::validate) reports the same problem as a
    /// [`ConfigError`].
    pub fn window(&self) -> crate::error::Result<HourWindow> {
        HourWindow::new(self.hours.start, self.hours.end)
    }

    /// Validate the configuration.
    ///
    /// Metric bounds are deliberately NOT checked for `min <= max`; inverted
    /// pairs are legal input and produce descending plan sequences.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dates.start > self.dates.end {
            return Err(ConfigError::InvalidValue {
                key: "dates.start".to_string(),
                message: format!(
                    "start date {} is after end date {}",
                    self.dates.start, self.dates.end
                ),
            });
        }
        if self.hours.end > 23 {
            return Err(ConfigError::InvalidValue {
                key: "hours.end".to_string(),
                message: format!("must be at most 23, got {}", self.hours.end),
            });
        }
        if self.hours.start > self.hours.end {
            return Err(ConfigError::InvalidValue {
                key: "hours.start".to_string(),
                message: format!(
                    "must not exceed hours.end ({} > {})",
                    self.hours.start, self.hours.end
                ),
            });
        }

        let percentages = [
            ("tiers.light", self.tiers.light),
            ("tiers.medium", self.tiers.medium),
            ("tiers.heavy", self.tiers.heavy),
            ("tiers.none", self.tiers.none),
            ("plans.ramp_up", self.plans.ramp_up),
            ("plans.flatten", self.plans.flatten),
            ("plans.read_only", self.plans.read_only),
            ("plans.ramp_down", self.plans.ramp_down),
            ("plans.flatten_at", self.plans.flatten_at),
        ];
        for (key, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("percentage must be in 0..=100, got {value}"),
                });
            }
        }

        if self.activity.min_times_started > self.activity.max_times_started {
            return Err(ConfigError::InvalidValue {
                key: "activity.min_times_started".to_string(),
                message: format!(
                    "must not exceed activity.max_times_started ({} > {})",
                    self.activity.min_times_started, self.activity.max_times_started
                ),
            });
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_start_hour() -> u8 {
    8
}

fn default_end_hour() -> u8 {
    17
}

fn default_min_times_started() -> u32 {
    1
}

fn default_max_times_started() -> u32 {
    6
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

fn default_end_date() -> NaiveDate {
    // Eight plan weeks from the default start.
    NaiveDate::from_ymd_opt(2024, 2, 23).expect("valid date")
}

fn default_bounds() -> UsageBounds {
    UsageBounds {
        light: TierBounds {
            minutes: MetricBounds::new(10.0, 60.0),
            keystrokes: MetricBounds::new(100.0, 1000.0),
            mouse_clicks: MetricBounds::new(50.0, 500.0),
        },
        medium: TierBounds {
            minutes: MetricBounds::new(60.0, 240.0),
            keystrokes: MetricBounds::new(1000.0, 5000.0),
            mouse_clicks: MetricBounds::new(500.0, 2500.0),
        },
        heavy: TierBounds {
            minutes: MetricBounds::new(240.0, 480.0),
            keystrokes: MetricBounds::new(5000.0, 15000.0),
            mouse_clicks: MetricBounds::new(2500.0, 8000.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimulationConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.num_weeks(), 8);
        assert_eq!(cfg.flatten_week(8), 4);
        assert_eq!(cfg.window().unwrap().width(), 10);
    }

    #[test]
    fn toml_round_trip() {
        let cfg = SimulationConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: SimulationConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, SimulationConfig::default());
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let parsed: SimulationConfig = toml::from_str(
            r#"
            seed = 42

            [hours]
            start = 6
            end = 22
            "#,
        )
        .unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.hours.start, 6);
        assert_eq!(parsed.hours.end, 22);
        assert_eq!(parsed.dates, DatesConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = SimulationConfig::default();
        cfg.seed = Some(7);
        cfg.tiers.heavy = 30.0;
        cfg.save(&path).unwrap();

        let loaded = SimulationConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimulationConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = SimulationConfig::default();
        cfg.hours.end = 24;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut cfg = SimulationConfig::default();
        cfg.hours.start = 18;
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.dates.end = cfg.dates.start.pred_opt().unwrap();
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.tiers.light = 120.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.activity.min_times_started = 10;
        cfg.activity.max_times_started = 2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_metric_bounds_are_allowed() {
        let mut cfg = SimulationConfig::default();
        cfg.bounds.light.minutes = MetricBounds::new(60.0, 10.0);
        cfg.validate().unwrap();
    }
}
