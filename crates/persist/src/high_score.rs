use crate::settings::SettingsStore;

/// Settings key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "score";

/// Best score so far, mirrored into a settings store.
///
/// Storage failures never stop the game: they are logged and the in-memory
/// value keeps going.
#[derive(Debug)]
pub struct HighScore<S> {
    store: S,
    best: i64,
}

impl<S: SettingsStore> HighScore<S> {
    /// Read the stored value. Missing or unreadable values start at 0.
    pub fn load(store: S) -> Self {
        let best = match store.get_int(HIGH_SCORE_KEY) {
            Ok(Some(v)) => v.max(0),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "could not read high score, starting from 0");
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> i64 {
        self.best
    }

    /// Offer a score. Returns true and persists it when it beats the best.
    pub fn submit(&mut self, score: i64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.persist();
        true
    }

    /// Explicitly set the stored high score back to 0.
    pub fn reset(&mut self) {
        self.best = 0;
        self.persist();
        tracing::info!("high score reset");
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.set_int(HIGH_SCORE_KEY, self.best) {
            tracing::warn!(error = %e, best = self.best, "could not persist high score");
        }
    }
}
