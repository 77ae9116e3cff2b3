use serde::{Deserialize, Serialize};

/// Whether the level is running or showing the pause menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    #[default]
    Playing,
    Paused,
}

impl MenuState {
    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }
}

/// Buttons of the pause and main menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    Pause,
    Resume,
    TogglePause,
    /// Reload the current level from scratch.
    Restart,
    /// Leave the level for the main menu.
    MainMenu,
    /// Set the persisted high score back to 0.
    ResetHighScore,
}

/// Scenes the session can ask the host to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    Level,
    MainMenu,
}

impl SceneRequest {
    pub fn name(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::MainMenu => "main_menu",
        }
    }
}

/// Host hook that performs scene loads.
pub trait SceneLoader {
    fn load(&mut self, scene: SceneRequest);
}

impl<F: FnMut(SceneRequest)> SceneLoader for F {
    fn load(&mut self, scene: SceneRequest) {
        self(scene)
    }
}
