//! Roller Kernel: the physics contract the game logic drives, a small
//! deterministic reference backend, camera ray projection and touch targets.
//!
//! # Invariants
//! - Game logic only talks to physics through the `Physics` trait.
//! - The reference `World` iterates bodies in `EntityId` order, so identical
//!   inputs produce identical states.

pub mod camera;
pub mod physics;
pub mod touchable;
pub mod world;

pub use camera::Camera;
pub use physics::{KernelError, Physics, Ray, RayHit};
pub use touchable::{TouchTargets, Touchable};
pub use world::{Body, Collider, RigidBody, World};
