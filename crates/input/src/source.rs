use std::fmt;
use std::str::FromStr;

use roller_common::ScreenMetrics;
use serde::{Deserialize, Serialize};

use crate::frame::InputFrame;

/// Errors from input configuration.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown horizontal input source {0:?} (expected axis, pointer, accelerometer, screen_touch or joystick)")]
    UnknownSource(String),
}

/// Where the lateral steering signal comes from.
///
/// Sources are mutually exclusive: the session reads exactly one of them
/// every fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalSource {
    /// Keyboard or gamepad horizontal axis.
    #[default]
    Axis,
    /// Pointer position relative to the screen center.
    Pointer,
    /// Device tilt along the X axis.
    Accelerometer,
    /// First active touch relative to the screen center.
    ScreenTouch,
    /// On-screen joystick deflection.
    Joystick,
}

impl HorizontalSource {
    pub const ALL: [HorizontalSource; 5] = [
        Self::Axis,
        Self::Pointer,
        Self::Accelerometer,
        Self::ScreenTouch,
        Self::Joystick,
    ];

    /// Steering signal in [-1, 1]. Sources with nothing to report read as 0.
    pub fn read(self, frame: &InputFrame, screen: &ScreenMetrics) -> f32 {
        let raw = match self {
            Self::Axis => frame.axis_horizontal,
            Self::Pointer => frame
                .pointer
                .map_or(0.0, |p| offset_from_center(p.x, screen)),
            Self::Accelerometer => frame.acceleration.x,
            Self::ScreenTouch => frame
                .first_active_touch()
                .map_or(0.0, |t| offset_from_center(t.position.x, screen)),
            Self::Joystick => frame.joystick.map_or(0.0, |j| j.x),
        };
        if raw.is_finite() {
            raw.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether this source depends on an optional device the frame may lack.
    pub fn is_available(self, frame: &InputFrame) -> bool {
        match self {
            Self::Pointer => frame.pointer.is_some(),
            Self::Joystick => frame.joystick.is_some(),
            _ => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Axis => "axis",
            Self::Pointer => "pointer",
            Self::Accelerometer => "accelerometer",
            Self::ScreenTouch => "screen_touch",
            Self::Joystick => "joystick",
        }
    }
}

fn offset_from_center(x: f32, screen: &ScreenMetrics) -> f32 {
    let cx = screen.center().x;
    if cx > 0.0 { (x - cx) / cx } else { 0.0 }
}

impl fmt::Display for HorizontalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HorizontalSource {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|src| src.as_str() == normalized)
            .ok_or_else(|| InputError::UnknownSource(s.to_string()))
    }
}
