use glam::{Vec2, Vec3};
use roller_common::ScreenMetrics;
use roller_input::{InputFrame, Touch};

/// Frames per second of generated demo input.
pub const SCRIPT_FPS: f32 = 60.0;

/// Build a seeded input script: a steering wave on every source, periodic
/// swipes and pinches, and one pause window.
pub fn demo_script(seconds: f32, seed: u64, screen: &ScreenMetrics) -> Vec<InputFrame> {
    let total = (seconds.max(0.0) * SCRIPT_FPS).round() as usize;
    let mut rng = SplitMix64(seed);
    let center = screen.center();

    let mut frames: Vec<InputFrame> = (0..total)
        .map(|i| {
            let t = i as f32 / SCRIPT_FPS;
            let steer = (t * 1.3).sin() * 0.8;
            InputFrame {
                axis_horizontal: steer,
                pointer: Some(Vec2::new(center.x + steer * center.x, center.y)),
                acceleration: Vec3::new(steer, 0.0, -1.0),
                joystick: Some(Vec2::new(steer, 0.0)),
                ..InputFrame::default()
            }
        })
        .collect();

    // Swipes roughly every two seconds, some too short to count.
    let mut i = (SCRIPT_FPS as usize) / 2;
    while i + 6 < total {
        let dx = rng.range(40.0, 300.0) * if rng.next_u64() % 2 == 0 { 1.0 } else { -1.0 };
        let start = Vec2::new(center.x, center.y * 0.5);
        frames[i].touches = vec![Touch::began(0, start)];
        frames[i + 6].touches = vec![Touch::ended(0, start + Vec2::new(dx, 0.0))];
        i += (SCRIPT_FPS * rng.range(1.5, 2.5)) as usize;
    }

    // A ten-frame pinch every five seconds, alternating spread and squeeze.
    let mut spread = true;
    let mut i = (SCRIPT_FPS * 3.0) as usize + 3;
    while i + 10 < total {
        let step = if spread { 8.0 } else { -8.0 };
        for (k, frame) in frames[i..i + 10].iter_mut().enumerate() {
            let half = 100.0 + step * k as f32;
            frame.touches = vec![
                Touch::moved(1, center - Vec2::new(half, 0.0), Vec2::new(-step, 0.0)),
                Touch::moved(2, center + Vec2::new(half, 0.0), Vec2::new(step, 0.0)),
            ];
        }
        spread = !spread;
        i += (SCRIPT_FPS * 5.0) as usize;
    }

    // Pause for a slice of the run.
    if total >= 10 {
        frames[total * 2 / 5].cancel_pressed = true;
        frames[total / 2].cancel_pressed = true;
    }

    // Tap straight ahead now and then.
    for frame in frames.iter_mut().step_by((SCRIPT_FPS * 3.0) as usize).skip(1) {
        frame.pointer = Some(Vec2::new(center.x, center.y * 1.1));
        frame.pointer_pressed = true;
    }

    frames
}

/// Splitmix64 generator, so a seed always yields the same demo input.
pub struct SplitMix64(pub u64);

impl SplitMix64 {
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        lo + (hi - lo) * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_length_matches_duration() {
        let frames = demo_script(2.0, 1, &ScreenMetrics::default());
        assert_eq!(frames.len(), 120);
    }

    #[test]
    fn same_seed_same_script() {
        let screen = ScreenMetrics::default();
        assert_eq!(demo_script(8.0, 9, &screen), demo_script(8.0, 9, &screen));
    }

    #[test]
    fn script_pauses_and_resumes() {
        let frames = demo_script(10.0, 3, &ScreenMetrics::default());
        assert_eq!(frames.iter().filter(|f| f.cancel_pressed).count(), 2);
    }

    #[test]
    fn rng_range_is_bounded() {
        let mut rng = SplitMix64(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
