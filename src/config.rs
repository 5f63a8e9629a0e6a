//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KYUSEI_*` prefix, `__` as separator)
//! 2. `kyusei.toml` in the working directory
//! 3. Built-in defaults
//!
//! Figment maps `KYUSEI_TIMEZONE__OFFSET_MINUTES` -> `timezone.offset_minutes`,
//! `KYUSEI_JIAZI__RADIUS_DAYS` -> `jiazi.radius_days`, etc.

use std::path::Path;

use chrono::FixedOffset;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub timezone: TimezoneConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub jiazi: JiaZiConfig,
}

/// The zone in which every input is normalized to a civil date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimezoneConfig {
    /// Descriptive name, only used in output.
    #[serde(default = "default_zone_name")]
    pub name: String,
    /// Offset east of UTC. Historical DST is not modelled, see
    /// [`DateInput`](crate::DateInput).
    #[serde(default = "default_offset_minutes")]
    pub offset_minutes: i32,
}

fn default_zone_name() -> String {
    "Asia/Taipei".to_owned()
}

const fn default_offset_minutes() -> i32 {
    480
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            name: default_zone_name(),
            offset_minutes: default_offset_minutes(),
        }
    }
}

impl TimezoneConfig {
    /// The zone as a `chrono` offset, `None` if out of range.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset_minutes.checked_mul(60)?)
    }
}

/// Tuning for the sun-longitude crossing search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Coarse scan step in days.
    #[serde(default = "default_step_days")]
    pub step_days: f64,
    /// How far from the seed a single search may scan.
    #[serde(default = "default_max_scan_days")]
    pub max_scan_days: f64,
    /// Bisection iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Bisection stops once the bracket is narrower than this.
    #[serde(default = "default_convergence_days")]
    pub convergence_days: f64,
}

const fn default_step_days() -> f64 {
    1.0
}

const fn default_max_scan_days() -> f64 {
    40.0
}

const fn default_max_iterations() -> u32 {
    64
}

const fn default_convergence_days() -> f64 {
    1e-7
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_days: default_step_days(),
            max_scan_days: default_max_scan_days(),
            max_iterations: default_max_iterations(),
            convergence_days: default_convergence_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JiaZiConfig {
    /// Largest day offset tried when looking for the nearest Jia-Zi day.
    ///
    /// Jia-Zi days are 60 days apart, so values below 30 fail for some
    /// solstices.
    #[serde(default = "default_radius_days")]
    pub radius_days: u32,
}

const fn default_radius_days() -> u32 {
    14
}

impl Default for JiaZiConfig {
    fn default() -> Self {
        Self {
            radius_days: default_radius_days(),
        }
    }
}

impl Config {
    /// Load configuration from `kyusei.toml` (if present) and environment
    /// variables on top of the defaults, then validate it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::figment())
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn load_from(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so callers can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let local_path = Path::new("kyusei.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("KYUSEI_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timezone.offset().is_none() {
            return Err(invalid(
                "timezone.offset_minutes",
                format!("{} is not within ±18 hours", self.timezone.offset_minutes),
            ));
        }
        let search = &self.search;
        if !positive(search.step_days) {
            return Err(invalid("search.step_days", "must be positive"));
        }
        if search.max_scan_days.is_nan() || search.max_scan_days < search.step_days {
            return Err(invalid(
                "search.max_scan_days",
                "must be at least one scan step",
            ));
        }
        if !positive(search.convergence_days) {
            return Err(invalid("search.convergence_days", "must be positive"));
        }
        if search.max_iterations == 0 {
            return Err(invalid("search.max_iterations", "must be non-zero"));
        }
        if self.jiazi.radius_days == 0 {
            return Err(invalid("jiazi.radius_days", "must be non-zero"));
        }
        Ok(())
    }
}

/// `false` for NaN as well as for non-positive values.
fn positive(v: f64) -> bool {
    v > 0.0
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_are_correct() {
        let config = Config::default();
        assert_eq!("Asia/Taipei", config.timezone.name);
        assert_eq!(480, config.timezone.offset_minutes);
        assert_eq!(Some(8 * 3600), config.timezone.offset().map(|o| o.local_minus_utc()));
        assert_eq!(14, config.jiazi.radius_days);
        assert_eq!(1.0, config.search.step_days);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        Jail::expect_with(|_jail| {
            let config = Config::load().expect("should extract defaults");
            assert_eq!(Config::default(), config);
            Ok(())
        });
    }

    #[test]
    fn toml_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "kyusei.toml",
                r#"
                [timezone]
                name = "Asia/Tokyo"
                offset_minutes = 540

                [search]
                max_scan_days = 20.0
                "#,
            )?;
            jail.set_env("KYUSEI_JIAZI__RADIUS_DAYS", "30");
            jail.set_env("KYUSEI_TIMEZONE__NAME", "JST");

            let config = Config::load().expect("layered config");
            assert_eq!("JST", config.timezone.name);
            assert_eq!(540, config.timezone.offset_minutes);
            assert_eq!(20.0, config.search.max_scan_days);
            assert_eq!(1.0, config.search.step_days);
            assert_eq!(30, config.jiazi.radius_days);
            Ok(())
        });
    }

    #[test]
    fn rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("KYUSEI_TIMEZONE__OFFSET_MINUTES", "2000");
            assert!(matches!(
                Config::load(),
                Err(ConfigError::InvalidValue { field, .. }) if field == "timezone.offset_minutes"
            ));
            Ok(())
        });

        let mut config = Config::default();
        config.jiazi.radius_days = 0;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.search.step_days = -1.0;
        assert!(config.validate().is_err());
    }
}
