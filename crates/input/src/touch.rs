use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle of a single finger on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    /// Whether the finger is still on the screen.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Moved | Self::Stationary)
    }
}

/// One finger as reported for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: u32,
    /// Screen position in pixels, origin bottom-left.
    pub position: Vec2,
    /// Movement since the previous frame, in pixels.
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl Touch {
    pub fn new(id: u32, position: Vec2, delta: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            delta,
            phase,
        }
    }

    pub fn began(id: u32, position: Vec2) -> Self {
        Self::new(id, position, Vec2::ZERO, TouchPhase::Began)
    }

    pub fn moved(id: u32, position: Vec2, delta: Vec2) -> Self {
        Self::new(id, position, delta, TouchPhase::Moved)
    }

    pub fn ended(id: u32, position: Vec2) -> Self {
        Self::new(id, position, Vec2::ZERO, TouchPhase::Ended)
    }

    pub fn previous_position(&self) -> Vec2 {
        self.position - self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_position_subtracts_delta() {
        let t = Touch::moved(0, Vec2::new(100.0, 50.0), Vec2::new(10.0, -5.0));
        assert_eq!(t.previous_position(), Vec2::new(90.0, 55.0));
    }

    #[test]
    fn active_phases() {
        assert!(TouchPhase::Began.is_active());
        assert!(TouchPhase::Stationary.is_active());
        assert!(!TouchPhase::Ended.is_active());
        assert!(!TouchPhase::Canceled.is_active());
    }
}
