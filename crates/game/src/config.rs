use std::path::Path;

use roller_common::ScreenMetrics;
use roller_input::HorizontalSource;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tuning for the player ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Constant force along +Z applied every fixed step.
    pub forward_speed: f32,
    /// Multiplier for the horizontal steering signal.
    pub lateral_speed: f32,
    /// Sideways distance of one swipe lane change, in world units.
    pub swipe_move: f32,
    /// Minimum swipe travel in inches.
    pub min_swipe_inches: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub start_scale: f32,
    /// Scale change per pixel of finger separation per second.
    pub pinch_speed: f32,
    pub radius: f32,
    pub mass: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            forward_speed: 10.0,
            lateral_speed: 15.0,
            swipe_move: 2.0,
            min_swipe_inches: 0.25,
            min_scale: 0.5,
            max_scale: 2.0,
            start_scale: 1.0,
            pinch_speed: 0.05,
            radius: 0.5,
            mass: 1.0,
        }
    }
}

/// Which input features are active.
///
/// Steering and gestures can be layered (a screen-touch steering source
/// while swipes are enabled) or kept apart; nothing is implied by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub source: HorizontalSource,
    pub tap: bool,
    pub swipe: bool,
    pub pinch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: HorizontalSource::Axis,
            tap: true,
            swipe: true,
            pinch: true,
        }
    }
}

/// Complete session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub input: InputConfig,
    pub screen: ScreenMetrics,
    /// Fixed simulation step in seconds.
    pub fixed_dt: f32,
    /// Upper bound on fixed steps run for a single rendered frame.
    pub max_steps_per_frame: u32,
    /// Velocity fraction removed per second by the reference physics world.
    pub linear_drag: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            input: InputConfig::default(),
            screen: ScreenMetrics::default(),
            fixed_dt: 0.02,
            max_steps_per_frame: 5,
            linear_drag: 0.5,
        }
    }
}

impl GameConfig {
    /// Parse YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        let checks = [
            (p.min_scale > 0.0, "player.min_scale must be positive"),
            (p.min_scale <= p.max_scale, "player.min_scale must not exceed player.max_scale"),
            (
                (p.min_scale..=p.max_scale).contains(&p.start_scale),
                "player.start_scale must lie within [min_scale, max_scale]",
            ),
            (p.min_swipe_inches >= 0.0, "player.min_swipe_inches must not be negative"),
            (p.swipe_move >= 0.0, "player.swipe_move must not be negative"),
            (p.radius > 0.0, "player.radius must be positive"),
            (p.mass > 0.0, "player.mass must be positive"),
            (
                self.fixed_dt > 0.0 && self.fixed_dt.is_finite(),
                "fixed_dt must be a positive number of seconds",
            ),
            (self.max_steps_per_frame >= 1, "max_steps_per_frame must be at least 1"),
            (self.linear_drag >= 0.0, "linear_drag must not be negative"),
        ];
        match checks.into_iter().find(|(ok, _)| !ok) {
            Some((_, msg)) => Err(ConfigError::Invalid(msg.to_string())),
            None => Ok(()),
        }
    }
}
