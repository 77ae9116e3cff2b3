use std::cell::RefCell;
use std::rc::Rc;

use roller_persist::{HighScore, SettingsStore};

use crate::player::PlayerState;

/// Text sink for the on-screen score.
pub trait ScoreDisplay {
    fn show(&mut self, score: i64, best: i64);
}

/// Score display that keeps the rendered text where a clone can read it.
#[derive(Debug, Clone, Default)]
pub struct SharedScoreText(Rc<RefCell<String>>);

impl SharedScoreText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl ScoreDisplay for SharedScoreText {
    fn show(&mut self, score: i64, best: i64) {
        *self.0.borrow_mut() = format!("Score: {score}  Best: {best}");
    }
}

/// Publishes every score change to the display and the high score.
pub struct ScoreKeeper {
    high_score: HighScore<Box<dyn SettingsStore>>,
    display: Option<Box<dyn ScoreDisplay>>,
}

impl ScoreKeeper {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self {
            high_score: HighScore::load(store),
            display: None,
        }
    }

    pub fn set_display(&mut self, display: impl ScoreDisplay + 'static) {
        self.display = Some(Box::new(display));
    }

    pub fn clear_display(&mut self) {
        self.display = None;
    }

    pub fn high_score(&self) -> i64 {
        self.high_score.best()
    }

    /// Add elapsed time to the player's score and publish it.
    pub fn accumulate(&mut self, player: &mut PlayerState, dt: f32) {
        let score = player.add_score(dt);
        self.publish(score);
    }

    /// Zero the player's score and publish it.
    pub fn reset(&mut self, player: &mut PlayerState) {
        player.reset_score();
        self.publish(0.0);
    }

    /// Explicitly reset the persisted high score to 0.
    pub fn reset_high_score(&mut self, current: f32) {
        self.high_score.reset();
        self.show(whole_points(current));
    }

    fn publish(&mut self, score: f32) {
        let points = whole_points(score);
        if self.high_score.submit(points) {
            tracing::debug!(best = points, "new high score");
        }
        self.show(points);
    }

    fn show(&mut self, points: i64) {
        let best = self.high_score.best();
        if let Some(display) = self.display.as_mut() {
            display.show(points, best);
        }
    }
}

impl std::fmt::Debug for ScoreKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreKeeper")
            .field("high_score", &self.high_score.best())
            .field("display", &self.display.is_some())
            .finish()
    }
}

fn whole_points(score: f32) -> i64 {
    if score.is_finite() {
        score.floor() as i64
    } else {
        0
    }
}
