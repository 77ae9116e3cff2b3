use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::touch::Touch;

/// Everything the platform reported for one rendered frame.
///
/// Sources that the platform does not have stay at their neutral value
/// (`None`, zero, empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Keyboard/gamepad horizontal axis in [-1, 1].
    pub axis_horizontal: f32,
    /// Pointer position in screen pixels, if a pointer exists.
    pub pointer: Option<Vec2>,
    /// Primary pointer button went down this frame.
    pub pointer_pressed: bool,
    /// Device acceleration in g.
    pub acceleration: Vec3,
    pub touches: Vec<Touch>,
    /// On-screen joystick deflection. `None` when no joystick is present.
    pub joystick: Option<Vec2>,
    /// The designated cancel input (escape/back) went down this frame.
    pub cancel_pressed: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_axis(axis_horizontal: f32) -> Self {
        Self {
            axis_horizontal,
            ..Self::default()
        }
    }

    pub fn with_touches(touches: Vec<Touch>) -> Self {
        Self {
            touches,
            ..Self::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancel_pressed: true,
            ..Self::default()
        }
    }

    /// First touch that is still on the screen.
    pub fn first_active_touch(&self) -> Option<&Touch> {
        self.touches.iter().find(|t| t.phase.is_active())
    }
}

/// Supplies one `InputFrame` per rendered frame.
pub trait InputSampler {
    fn sample(&mut self) -> InputFrame;
}

/// Sampler that never reports any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSampler for IdleInput {
    fn sample(&mut self) -> InputFrame {
        InputFrame::idle()
    }
}

/// Replays a prepared list of frames, then reports idle frames.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }

    /// Frames still waiting to be replayed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::{Touch, TouchPhase};

    #[test]
    fn scripted_input_replays_then_idles() {
        let mut input = ScriptedInput::new([InputFrame::with_axis(1.0), InputFrame::cancel()]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.sample().axis_horizontal, 1.0);
        assert!(input.sample().cancel_pressed);
        assert_eq!(input.sample(), InputFrame::idle());
    }

    #[test]
    fn first_active_touch_skips_ended() {
        let frame = InputFrame::with_touches(vec![
            Touch::ended(0, Vec2::new(1.0, 1.0)),
            Touch::new(1, Vec2::new(5.0, 5.0), Vec2::ZERO, TouchPhase::Stationary),
        ]);
        assert_eq!(frame.first_active_touch().map(|t| t.id), Some(1));
    }
}
