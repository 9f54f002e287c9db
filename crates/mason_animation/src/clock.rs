//! Frame clock
//!
//! Turns the timestamps handed to an animation-frame callback into deltas.
//! The first tick after creation or [`FrameClock::pause`] only records the
//! timestamp.

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_tick_ms: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return the seconds since the previous
    /// frame, or `None` on the first frame of a run.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let Some(last) = self.last_tick_ms.replace(now_ms) else {
            return None;
        };
        // Timestamps from a host can step backwards after a suspend
        let dt = ((now_ms - last) / 1000.0).max(0.0);
        self.elapsed += dt;
        Some(dt as f32)
    }

    /// Forget the last timestamp so the next tick starts a new run.
    /// Accumulated time is kept.
    pub fn pause(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Total seconds accumulated across runs
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.last_tick_ms = None;
        self.elapsed = 0.0;
    }
}
