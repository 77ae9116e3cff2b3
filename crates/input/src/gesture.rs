use glam::Vec2;
use roller_common::{LaneDirection, ScreenMetrics};
use serde::{Deserialize, Serialize};

use crate::touch::{Touch, TouchPhase};

/// Recognizes horizontal swipes from a single finger.
///
/// A swipe is resolved when the finger that began it is lifted. Putting a
/// second finger down abandons the swipe so pinches never change lanes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeDetector {
    /// Minimum horizontal travel, in inches, for a swipe to count.
    pub min_swipe_inches: f32,
    tracking: Option<(u32, Vec2)>,
    last_start: Option<Vec2>,
}

impl SwipeDetector {
    pub fn new(min_swipe_inches: f32) -> Self {
        Self {
            min_swipe_inches,
            tracking: None,
            last_start: None,
        }
    }

    /// Where the most recent gesture started, in screen pixels.
    pub fn last_start(&self) -> Option<Vec2> {
        self.last_start
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Pixel threshold on `screen` for the configured inch distance. With an
    /// unknown dpi the inch value is used as a pixel count.
    pub fn threshold_pixels(&self, screen: &ScreenMetrics) -> f32 {
        if screen.dpi > 0.0 {
            screen.inches_to_pixels(self.min_swipe_inches)
        } else {
            self.min_swipe_inches
        }
    }

    /// Feed this frame's touches. Returns a direction when a swipe completes.
    pub fn observe(&mut self, touches: &[Touch], screen: &ScreenMetrics) -> Option<LaneDirection> {
        if touches.len() > 1 {
            if self.tracking.take().is_some() {
                tracing::debug!("swipe abandoned: multiple touches");
            }
            return None;
        }
        let touch = touches.first()?;
        match touch.phase {
            TouchPhase::Began => {
                self.tracking = Some((touch.id, touch.position));
                self.last_start = Some(touch.position);
                None
            }
            TouchPhase::Moved | TouchPhase::Stationary => None,
            TouchPhase::Canceled => {
                self.tracking = None;
                None
            }
            TouchPhase::Ended => {
                let (id, start) = self.tracking.take()?;
                if id != touch.id {
                    return None;
                }
                self.resolve(touch.position.x - start.x, screen)
            }
        }
    }

    /// Classify a horizontal pixel delta against the threshold.
    pub fn resolve(&self, dx: f32, screen: &ScreenMetrics) -> Option<LaneDirection> {
        if !dx.is_finite() || dx.abs() < self.threshold_pixels(screen) {
            tracing::debug!(dx, "swipe below threshold");
            return None;
        }
        Some(LaneDirection::from_delta(dx))
    }
}

/// Measures two-finger pinch motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchDetector;

impl PinchDetector {
    /// Change in finger separation since the previous frame, in pixels.
    ///
    /// Positive when the fingers move apart. `None` unless exactly two
    /// touches are present.
    pub fn distance_change(touches: &[Touch]) -> Option<f32> {
        let [a, b] = touches else {
            return None;
        };
        let previous = a.previous_position().distance(b.previous_position());
        let current = a.position.distance(b.position);
        Some(current - previous)
    }
}
