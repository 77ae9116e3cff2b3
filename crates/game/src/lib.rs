//! Roller game logic: one owned session driven by an explicit fixed-timestep loop.
//!
//! # Invariants
//! - Player scale always stays within the configured bounds.
//! - Score and forces only advance while the session is not paused.
//! - The persisted high score never decreases except through an explicit reset.

pub mod config;
pub mod gesture;
pub mod menu;
pub mod movement;
pub mod player;
pub mod score;
pub mod session;
pub mod timestep;

pub use config::{ConfigError, GameConfig, InputConfig, PlayerConfig};
pub use gesture::GestureHandler;
pub use menu::{MenuCommand, MenuState, SceneLoader, SceneRequest};
pub use movement::MovementController;
pub use player::PlayerState;
pub use score::{ScoreDisplay, ScoreKeeper, SharedScoreText};
pub use session::{FrameReport, GameSession, SessionSummary};
pub use timestep::FixedTimestep;
