//! Shared value types used across the roller crates.

pub mod screen;
pub mod types;

pub use screen::{LaneDirection, ScreenMetrics};
pub use types::{EntityId, Transform};
