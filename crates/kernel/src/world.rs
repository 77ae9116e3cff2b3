use glam::Vec3;
use roller_common::{EntityId, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::physics::{KernelError, Physics, Ray, RayHit};

/// Mass properties of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub mass: f32,
    /// Kinematic bodies ignore forces and never move on their own.
    pub is_kinematic: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            is_kinematic: false,
        }
    }
}

impl RigidBody {
    pub fn kinematic() -> Self {
        Self {
            is_kinematic: true,
            ..Self::default()
        }
    }
}

/// Collision shape in body-local units, scaled by the transform.
///
/// Boxes are axis aligned; rotation is ignored for collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Default for Collider {
    fn default() -> Self {
        Self::Box {
            half_extents: Vec3::splat(0.5),
        }
    }
}

/// Per-body data stored in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub transform: Transform,
    pub velocity: Vec3,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    #[serde(skip)]
    pending_force: Vec3,
}

impl Body {
    pub fn new(transform: Transform, rigid_body: RigidBody, collider: Collider) -> Self {
        Self {
            transform,
            velocity: Vec3::ZERO,
            rigid_body,
            collider,
            pending_force: Vec3::ZERO,
        }
    }

    /// Radius of the smallest sphere around the scaled collider.
    pub fn bounding_radius(&self) -> f32 {
        match self.collider {
            Collider::Sphere { radius } => radius * self.transform.scale.max_element(),
            Collider::Box { half_extents } => (half_extents * self.transform.scale).length(),
        }
    }

    /// Ray test against this body's collider grown by `inflate` on every side.
    fn intersect(&self, ray: &Ray, inflate: f32) -> Option<f32> {
        let center = self.transform.position;
        match self.collider {
            Collider::Sphere { radius } => {
                let r = radius * self.transform.scale.max_element() + inflate;
                ray_sphere(ray, center, r)
            }
            Collider::Box { half_extents } => {
                let half = half_extents * self.transform.scale + Vec3::splat(inflate);
                ray_aabb(ray, center - half, center + half)
            }
        }
    }
}

/// Reference rigid-body world.
///
/// Integrates with semi-implicit Euler and linear drag. There is no gravity
/// and no contact resolution: the roller only needs forces, teleports, ray
/// casts and sweeps.
///
/// Uses BTreeMap for deterministic iteration order across all platforms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    bodies: BTreeMap<EntityId, Body>,
    tick: u64,
    /// Fraction of velocity removed per second.
    linear_drag: f32,
}

impl World {
    /// Create an empty world at tick 0 with no drag.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag(linear_drag: f32) -> Self {
        Self {
            linear_drag: linear_drag.max(0.0),
            ..Self::default()
        }
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of bodies in the world.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Read-only access to all bodies (BTreeMap for deterministic iteration).
    pub fn bodies(&self) -> &BTreeMap<EntityId, Body> {
        &self.bodies
    }

    /// Add a body. Returns its id.
    pub fn spawn(&mut self, body: Body) -> EntityId {
        let id = EntityId::new();
        self.spawn_with_id(id, body);
        id
    }

    /// Add a body under a specific id, replacing any previous one.
    pub fn spawn_with_id(&mut self, id: EntityId, body: Body) {
        tracing::debug!(entity = %id.short(), "spawned body");
        self.bodies.insert(id, body);
    }

    /// Convenience for static level geometry.
    pub fn spawn_obstacle(&mut self, position: Vec3, half_extents: Vec3) -> EntityId {
        self.spawn(Body::new(
            Transform::at(position),
            RigidBody::kinematic(),
            Collider::Box { half_extents },
        ))
    }

    /// Remove a body. Returns the data if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// Compute a deterministic hash of the world state for comparison.
    /// Uses canonical (BTreeMap) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for (id, body) in &self.bodies {
            mix(&mut h, id.0.as_bytes());
            for v in [body.transform.position, body.velocity, body.transform.scale] {
                mix(&mut h, &v.x.to_le_bytes());
                mix(&mut h, &v.y.to_le_bytes());
                mix(&mut h, &v.z.to_le_bytes());
            }
        }
        h
    }
}

impl Physics for World {
    fn add_force(&mut self, body: EntityId, force: Vec3) -> Result<(), KernelError> {
        let b = self.get_mut(body).ok_or(KernelError::BodyNotFound(body))?;
        if !b.rigid_body.is_kinematic {
            b.pending_force += force;
        }
        Ok(())
    }

    fn transform(&self, body: EntityId) -> Option<Transform> {
        self.get(body).map(|b| b.transform)
    }

    fn set_position(&mut self, body: EntityId, position: Vec3) -> Result<(), KernelError> {
        let b = self.get_mut(body).ok_or(KernelError::BodyNotFound(body))?;
        b.transform.position = position;
        Ok(())
    }

    fn halt(&mut self, body: EntityId) -> Result<(), KernelError> {
        let b = self.get_mut(body).ok_or(KernelError::BodyNotFound(body))?;
        b.velocity = Vec3::ZERO;
        b.pending_force = Vec3::ZERO;
        Ok(())
    }

    fn set_scale(&mut self, body: EntityId, scale: f32) -> Result<(), KernelError> {
        let b = self.get_mut(body).ok_or(KernelError::BodyNotFound(body))?;
        b.transform.scale = Vec3::splat(scale);
        Ok(())
    }

    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.bodies
            .iter()
            .filter_map(|(id, body)| body.intersect(ray, 0.0).map(|t| (*id, t)))
            .filter(|(_, t)| *t <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, distance)| RayHit {
                entity,
                point: ray.at(distance),
                distance,
            })
    }

    fn sweep(&self, body: EntityId, direction: Vec3, distance: f32) -> Option<RayHit> {
        let mover = self.get(body)?;
        let ray = Ray::new(mover.transform.position, direction);
        let radius = mover.bounding_radius();
        self.bodies
            .iter()
            .filter(|(id, _)| **id != body)
            .filter_map(|(id, other)| other.intersect(&ray, radius).map(|t| (*id, t)))
            .filter(|(_, t)| *t <= distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, t)| RayHit {
                entity,
                point: ray.at(t),
                distance: t,
            })
    }

    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.tick += 1;
        let damping = 1.0 / (1.0 + self.linear_drag * dt);
        for body in self.bodies.values_mut() {
            let force = std::mem::take(&mut body.pending_force);
            if body.rigid_body.is_kinematic {
                continue;
            }
            let mass = body.rigid_body.mass.max(f32::EPSILON);
            body.velocity += force / mass * dt;
            body.velocity *= damping;
            body.transform.position += body.velocity * dt;
        }
    }
}

/// Distance along `ray` to a sphere, or the exit distance when the origin is inside.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        // Origin inside or on the surface.
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test. Returns 0 when the origin is inside the box.
fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }
    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}
