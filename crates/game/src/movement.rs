use glam::Vec3;
use roller_common::ScreenMetrics;
use roller_input::{HorizontalSource, InputFrame};
use roller_kernel::Physics;

use crate::config::PlayerConfig;
use crate::player::PlayerState;

/// Turns the steering signal into a force every fixed step.
#[derive(Debug, Clone)]
pub struct MovementController {
    pub forward_speed: f32,
    pub lateral_speed: f32,
    warned_unavailable: bool,
}

impl MovementController {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            forward_speed: config.forward_speed,
            lateral_speed: config.lateral_speed,
            warned_unavailable: false,
        }
    }

    /// Force for one fixed step: steering on X, constant forward push on Z.
    pub fn force(&self, source: HorizontalSource, frame: &InputFrame, screen: &ScreenMetrics) -> Vec3 {
        let horizontal = source.read(frame, screen);
        Vec3::new(horizontal * self.lateral_speed, 0.0, self.forward_speed)
    }

    /// Apply this step's force to the player body. Does nothing while
    /// paused. Returns the force that was applied.
    pub fn fixed_step(
        &mut self,
        player: &PlayerState,
        frame: &InputFrame,
        screen: &ScreenMetrics,
        physics: &mut dyn Physics,
        paused: bool,
    ) -> Option<Vec3> {
        if paused {
            return None;
        }
        if !player.mode.is_available(frame) && !self.warned_unavailable {
            tracing::warn!(source = %player.mode, "steering source unavailable, reading 0");
            self.warned_unavailable = true;
        }
        let force = self.force(player.mode, frame, screen);
        if let Err(e) = physics.add_force(player.body, force) {
            tracing::warn!(error = %e, "could not apply movement force");
            return None;
        }
        Some(force)
    }
}
