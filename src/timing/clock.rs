/// Monotonic elapsed-time accumulator for one scene.
///
/// Only the scene driver advances it; everything else reads `elapsed`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    elapsed: f64,
    last_delta: f64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero so time never runs
    /// backwards. Returns the delta actually applied.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.elapsed += dt;
        self.last_delta = dt;
        dt
    }

    /// Jump forward to an absolute time. Targets at or before `elapsed` are ignored. Returns the
    /// delta actually applied.
    pub fn advance_to(&mut self, elapsed: f64) -> f64 {
        if !(elapsed.is_finite() && elapsed > self.elapsed) {
            self.last_delta = 0.0;
            return 0.0;
        }
        let dt = elapsed - self.elapsed;
        self.elapsed = elapsed;
        self.last_delta = dt;
        dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/clock.rs"]
mod tests;
