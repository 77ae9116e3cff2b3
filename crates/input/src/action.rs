use glam::Vec2;
use roller_common::LaneDirection;
use serde::{Deserialize, Serialize};

/// A high-level action recognized from one frame of raw input.
///
/// The session consumes actions, never raw touches. Whether an action has an
/// effect (an obstacle blocks a lane change, a tap hits nothing) is decided
/// downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Pointer or finger went down at a screen point.
    Tap(Vec2),
    /// A completed horizontal swipe.
    Swipe(LaneDirection),
    /// Two-finger separation change in pixels since the last frame.
    Pinch(f32),
    /// The cancel input toggles pause.
    TogglePause,
}

impl Action {
    pub fn is_gesture(&self) -> bool {
        !matches!(self, Self::TogglePause)
    }
}
