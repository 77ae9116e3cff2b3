use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Physical description of the display that input coordinates refer to.
///
/// Screen coordinates are in pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    /// Dots per inch. Used to turn physical gesture distances into pixels.
    pub dpi: f32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
            dpi: 326.0,
        }
    }
}

impl ScreenMetrics {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn inches_to_pixels(&self, inches: f32) -> f32 {
        inches * self.dpi
    }

    /// Pixel distance in device-independent inches. Returns the raw pixel
    /// count when the dpi is unknown (zero or negative).
    pub fn pixels_to_inches(&self, pixels: f32) -> f32 {
        if self.dpi > 0.0 {
            pixels / self.dpi
        } else {
            pixels
        }
    }
}

/// Sideways lane change direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    /// Direction of a horizontal screen delta. Zero counts as right.
    pub fn from_delta(dx: f32) -> Self {
        if dx < 0.0 { Self::Left } else { Self::Right }
    }

    /// World-space unit vector along the lateral (X) axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_inch_at_326_dpi() {
        let screen = ScreenMetrics::default();
        assert!((screen.inches_to_pixels(0.25) - 81.5).abs() < 1e-4);
        assert!((screen.pixels_to_inches(81.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn unknown_dpi_passes_pixels_through() {
        let screen = ScreenMetrics {
            dpi: 0.0,
            ..ScreenMetrics::default()
        };
        assert_eq!(screen.pixels_to_inches(42.0), 42.0);
    }

    #[test]
    fn center_is_half_extent() {
        let screen = ScreenMetrics::default();
        assert_eq!(screen.center(), Vec2::new(540.0, 960.0));
    }

    #[test]
    fn lane_direction_from_sign() {
        assert_eq!(LaneDirection::from_delta(-3.0), LaneDirection::Left);
        assert_eq!(LaneDirection::from_delta(3.0), LaneDirection::Right);
        assert_eq!(LaneDirection::Left.unit(), Vec3::NEG_X);
        assert_eq!(LaneDirection::Right.unit(), Vec3::X);
    }
}
