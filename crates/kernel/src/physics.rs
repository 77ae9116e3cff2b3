use glam::Vec3;
use roller_common::{EntityId, Transform};
use serde::{Deserialize, Serialize};

/// Errors from physics operations on a specific body.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("body {0:?} not found")]
    BodyNotFound(EntityId),
}

/// A half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. Falls back to +Z for a zero vector.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// First thing a ray or sweep ran into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub entity: EntityId,
    pub point: Vec3,
    pub distance: f32,
}

/// What the game logic needs from a physics engine.
///
/// Forces are accumulated and consumed by the next `step`. Queries never
/// mutate the simulation.
pub trait Physics {
    /// Add a force to be integrated on the next step.
    fn add_force(&mut self, body: EntityId, force: Vec3) -> Result<(), KernelError>;

    fn transform(&self, body: EntityId) -> Option<Transform>;

    /// Teleport a body, keeping its velocity.
    fn set_position(&mut self, body: EntityId, position: Vec3) -> Result<(), KernelError>;

    /// Zero a body's velocity and drop its queued forces.
    fn halt(&mut self, body: EntityId) -> Result<(), KernelError>;

    /// Set a uniform scale on both the visual transform and the collider.
    fn set_scale(&mut self, body: EntityId, scale: f32) -> Result<(), KernelError>;

    /// Closest hit along `ray` within `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;

    /// Closest obstruction met by moving `body`'s collider along `direction`
    /// for `distance`. The body itself is never reported.
    fn sweep(&self, body: EntityId, direction: Vec3, distance: f32) -> Option<RayHit>;

    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Move a body by `offset`.
    fn translate(&mut self, body: EntityId, offset: Vec3) -> Result<(), KernelError> {
        let current = self
            .transform(body)
            .ok_or(KernelError::BodyNotFound(body))?;
        self.set_position(body, current.position + offset)
    }
}
