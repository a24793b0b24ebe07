/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Simulated wall clock in milliseconds.
///
/// Advances by the fixed tick length, so spawn cadence and creature
/// lifetimes are measured in simulated time rather than browser time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    elapsed_us: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_us += (dt.max(0.0) as f64 * 1_000_000.0).round() as u64;
    }

    /// Milliseconds since the clock started.
    pub fn now_ms(&self) -> u64 {
        self.elapsed_us / 1000
    }

    /// Whole seconds since the clock started.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_us / 1_000_000
    }
}

/// Format whole seconds as `HH:MM:SS` for the play timer.
pub fn format_play_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
