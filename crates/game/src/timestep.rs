/// Fixed-rate step scheduler fed by variable frame times.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    max_steps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds waiting for the next step.
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Add a frame's elapsed time and return how many fixed steps to run.
    ///
    /// At most `max_steps` are returned; time beyond that is dropped so a
    /// long stall cannot snowball into ever longer frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 || self.dt <= 0.0 {
            return 0;
        }
        let step = self.dt as f64;
        self.accumulator += frame_dt as f64;
        let mut steps = 0;
        while self.accumulator >= step && steps < self.max_steps {
            self.accumulator -= step;
            steps += 1;
        }
        if self.accumulator >= step {
            tracing::debug!(dropped = self.accumulator, "fixed step budget exceeded");
            self.accumulator %= step;
        }
        steps
    }
}
