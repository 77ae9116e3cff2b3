use glam::Vec2;
use roller_common::EntityId;
use roller_input::{HorizontalSource, SwipeDetector};

use crate::config::PlayerConfig;

/// Per-level state of the player ball.
///
/// Position lives in the physics body; everything else is held here.
/// Created at level start and replaced on restart.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub body: EntityId,
    pub mode: HorizontalSource,
    pub swipe: SwipeDetector,
    scale: f32,
    min_scale: f32,
    max_scale: f32,
    score: f32,
}

impl PlayerState {
    pub fn new(body: EntityId, config: &PlayerConfig, mode: HorizontalSource) -> Self {
        let mut player = Self {
            body,
            mode,
            swipe: SwipeDetector::new(config.min_swipe_inches),
            scale: 1.0,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            score: 0.0,
        };
        player.set_scale(config.start_scale);
        player
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scale_bounds(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    /// Set the uniform scale, clamped to bounds. Returns the applied value.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
        self.scale
    }

    /// Add a scale delta from a pinch, clamped to bounds.
    pub fn apply_pinch(&mut self, delta: f32) -> f32 {
        self.set_scale(self.scale + delta)
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Add elapsed seconds to the score. Negative or non-finite time is ignored.
    pub fn add_score(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.score += dt;
        }
        self.score
    }

    pub fn reset_score(&mut self) {
        self.score = 0.0;
    }

    pub fn last_touch_start(&self) -> Option<Vec2> {
        self.swipe.last_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(
            EntityId::new(),
            &PlayerConfig::default(),
            HorizontalSource::Axis,
        )
    }

    #[test]
    fn starts_at_configured_scale() {
        let p = player();
        assert_eq!(p.scale(), 1.0);
        assert_eq!(p.score(), 0.0);
        assert_eq!(p.last_touch_start(), None);
    }

    #[test]
    fn out_of_range_start_scale_is_clamped() {
        let config = PlayerConfig {
            start_scale: 9.0,
            ..PlayerConfig::default()
        };
        let p = PlayerState::new(EntityId::new(), &config, HorizontalSource::Axis);
        assert_eq!(p.scale(), config.max_scale);
    }

    #[test]
    fn pinch_sequence_stays_in_bounds() {
        let mut p = player();
        let (lo, hi) = p.scale_bounds();
        for delta in [0.3, 5.0, -0.1, -40.0, 0.05, f32::NAN, 1e9, -1e9, 0.7] {
            let s = p.apply_pinch(delta);
            assert!((lo..=hi).contains(&s), "scale {s} escaped [{lo}, {hi}]");
        }
    }

    #[test]
    fn score_is_sum_of_positive_deltas() {
        let mut p = player();
        p.add_score(0.5);
        p.add_score(0.25);
        p.add_score(-1.0);
        p.add_score(f32::INFINITY);
        assert_eq!(p.score(), 0.75);
        p.reset_score();
        assert_eq!(p.score(), 0.0);
    }
}
