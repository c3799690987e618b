//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `healstation.toml` in the working directory (or the path in
//! `HEALSTATION_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use healstation_app::ports::scene::Font;
use healstation_app::settings::{
    ANIMATION_DURATION, COOLDOWN_TIME, DEFAULT_PART_SIZE, FeedbackSettings, StationSettings,
};
use healstation_domain::color::{Color3, DAMAGE_COLOR, HEAL_COLOR};
use healstation_domain::easing::Easing;
use healstation_domain::error::ValidationError;
use healstation_domain::geometry::Vec3;
use healstation_domain::station::{Material, StationConfig};
use serde::Deserialize;

const DEFAULT_PATH: &str = "healstation.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trigger volume look and cooldown.
    pub stations: StationsConfig,
    /// Floating label timing and look.
    pub feedback: FeedbackConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Demo world loop.
    pub simulation: SimulationConfig,
    /// Stations to place at startup. Empty means the reference deployment.
    pub placements: Vec<StationConfig>,
}

/// Settings shared by every station.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StationsConfig {
    /// Trigger volume footprint, `[x, y, z]` in studs.
    pub part_size: Vec3,
    /// Body color of healing stations, `[r, g, b]`.
    pub heal_color: Color3,
    /// Body color of damaging stations, `[r, g, b]`.
    pub damage_color: Color3,
    /// Seconds before a station re-arms after firing.
    pub cooldown_secs: f64,
    /// Material used when a placement does not pick one.
    pub default_material: Material,
}

/// Feedback label settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Seconds the label animates before it is destroyed.
    pub animation_secs: f64,
    /// Height above the head where the label appears.
    pub offset_start: f64,
    /// Height the label rises to.
    pub offset_end: f64,
    /// Curve of the rise and fade-out.
    pub easing: Easing,
    pub font: Font,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Demo loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World updates per second.
    pub tick_hz: u32,
    /// Stop after this many seconds; `0` runs until interrupted.
    pub run_secs: f64,
    /// Walking speed of the demo character, in studs per second.
    pub walker_speed: f64,
}

impl Config {
    /// Load configuration from `healstation.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// A file named by `HEALSTATION_CONFIG` must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file is malformed, if the file named by
    /// `HEALSTATION_CONFIG` cannot be read, or if the resulting
    /// configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("HEALSTATION_CONFIG") {
            Ok(path) => Self::from_required_file(&path)?,
            Err(_) => Self::from_file(DEFAULT_PATH)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match Self::from_required_file(path) {
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn from_required_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(val) = env_parse("HEALSTATION_COOLDOWN_SECS") {
            self.stations.cooldown_secs = val;
        }
        if let Some(val) = env_parse("HEALSTATION_ANIMATION_SECS") {
            self.feedback.animation_secs = val;
        }
        if let Some(val) = env_parse("HEALSTATION_TICK_HZ") {
            self.simulation.tick_hz = val;
        }
        if let Some(val) = env_parse("HEALSTATION_RUN_SECS") {
            self.simulation.run_secs = val;
        }
        if let Ok(val) = std::env::var("HEALSTATION_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_hz == 0 {
            return Err(ConfigError::Validation(
                "tick_hz must be non-zero".to_string(),
            ));
        }
        if !self.simulation.walker_speed.is_finite() || self.simulation.walker_speed <= 0.0 {
            return Err(ConfigError::Validation(
                "walker_speed must be positive".to_string(),
            ));
        }
        secs(self.simulation.run_secs)?;
        self.station_settings()?.validate()?;
        self.feedback_settings()?;
        for placement in self.placements() {
            placement.validate()?;
        }
        Ok(())
    }

    /// Station settings derived from the `[stations]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeDuration`] for a negative or NaN
    /// cooldown.
    pub fn station_settings(&self) -> Result<StationSettings, ValidationError> {
        Ok(StationSettings {
            part_size: self.stations.part_size,
            heal_color: self.stations.heal_color,
            damage_color: self.stations.damage_color,
            cooldown: secs(self.stations.cooldown_secs)?,
            default_material: self.stations.default_material,
        })
    }

    /// Feedback settings derived from the `[feedback]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeDuration`] for a negative or NaN
    /// animation duration.
    pub fn feedback_settings(&self) -> Result<FeedbackSettings, ValidationError> {
        Ok(FeedbackSettings {
            animation_duration: secs(self.feedback.animation_secs)?,
            offset_start: self.feedback.offset_start,
            offset_end: self.feedback.offset_end,
            easing: self.feedback.easing,
            font: self.feedback.font,
            ..FeedbackSettings::default()
        })
    }

    /// Configured placements, or the reference deployment when none are given.
    #[must_use]
    pub fn placements(&self) -> Vec<StationConfig> {
        if self.placements.is_empty() {
            reference_deployment()
        } else {
            self.placements.clone()
        }
    }

    /// Duration of one world update.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.simulation.tick_hz.max(1)
    }

    /// How long to run, `None` for "until interrupted".
    #[must_use]
    pub fn run_for(&self) -> Option<Duration> {
        secs(self.simulation.run_secs)
            .ok()
            .filter(|duration| !duration.is_zero())
    }
}

/// Two damage stations flanking one heal station.
#[must_use]
pub fn reference_deployment() -> Vec<StationConfig> {
    vec![
        StationConfig::damage(Vec3::new(0.0, 0.5, -10.0), 20.0).with_name("spikes"),
        StationConfig::heal(Vec3::new(12.0, 0.5, -10.0), 25.0)
            .with_name("fountain")
            .with_material(Material::ForceField),
        StationConfig::damage(Vec3::new(-12.0, 0.5, -10.0), 50.0).with_name("lava"),
    ]
}

fn secs(value: f64) -> Result<Duration, ValidationError> {
    Duration::try_from_secs_f64(value).map_err(|_| ValidationError::NegativeDuration)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
            heal_color: HEAL_COLOR,
            damage_color: DAMAGE_COLOR,
            cooldown_secs: COOLDOWN_TIME.as_secs_f64(),
            default_material: Material::default(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        let defaults = FeedbackSettings::default();
        Self {
            animation_secs: ANIMATION_DURATION.as_secs_f64(),
            offset_start: defaults.offset_start,
            offset_end: defaults.offset_end,
            easing: defaults.easing,
            font: defaults.font,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "healstationd=info,healstation=info".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            run_secs: 0.0,
            walker_speed: 8.0,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A station or timing setting is out of range.
    #[error("invalid station settings")]
    Station(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
