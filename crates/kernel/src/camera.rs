use glam::Vec3;
use roller_common::ScreenMetrics;
use serde::{Deserialize, Serialize};

use crate::physics::Ray;

/// Perspective camera used to turn screen taps into world rays.
///
/// World convention: +Z is forward, +Y is up and screen-right maps to +X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub far: f32,
    /// Offset kept from the followed target.
    pub follow_offset: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        let follow_offset = Vec3::new(0.0, 4.0, -8.0);
        let mut camera = Self {
            position: follow_offset,
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0_f32.to_radians(),
            far: 1000.0,
            follow_offset,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }
}

impl Camera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        Vec3::Y.cross(self.forward()).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.forward().cross(self.right()).normalize()
    }

    /// Point the camera at `target` from its current position.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(dir) = (target - self.position).try_normalize() else {
            return;
        };
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
    }

    /// Keep the configured offset behind `target` and look at it.
    pub fn follow(&mut self, target: Vec3) {
        self.position = target + self.follow_offset;
        self.look_at(target);
    }

    /// Ray from the camera through a screen point (pixels, origin bottom-left).
    pub fn screen_point_to_ray(&self, point: glam::Vec2, screen: &ScreenMetrics) -> Ray {
        let w = screen.width.max(1.0);
        let h = screen.height.max(1.0);
        let ndc_x = point.x / w * 2.0 - 1.0;
        let ndc_y = point.y / h * 2.0 - 1.0;
        let tan_half = (self.fov * 0.5).tan();
        let dir = self.forward()
            + self.right() * ndc_x * tan_half * screen.aspect()
            + self.up() * ndc_y * tan_half;
        Ray::new(self.position, dir)
    }
}
