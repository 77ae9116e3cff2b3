//! Input sampling and gesture recognition.
//!
//! # Invariants
//! - Exactly one horizontal source steers the player; which one is chosen at runtime.
//! - Gesture detectors only look at the frames they are given and never block.

pub mod action;
pub mod frame;
pub mod gesture;
pub mod source;
pub mod touch;

pub use action::Action;
pub use frame::{IdleInput, InputFrame, InputSampler, ScriptedInput};
pub use gesture::{PinchDetector, SwipeDetector};
pub use source::{HorizontalSource, InputError};
pub use touch::{Touch, TouchPhase};
