//! Persistence: a small integer settings store and the high score kept in it.
//!
//! # Invariants
//! - The high score only changes when beaten or explicitly reset.
//! - Every accepted write reaches the backing store before the call returns.

pub mod high_score;
pub mod settings;
pub mod store;

pub use high_score::{HIGH_SCORE_KEY, HighScore};
pub use settings::{MemorySettings, SettingsStore};
pub use store::{FileSettings, StoreError};
