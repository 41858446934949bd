use crate::foundation::error::{ChaseError, ChaseResult};
use crate::timing::ease::Ease;

/// Clamped, linear sequence time: `min(elapsed / duration, 1)`, never negative.
pub fn normalized_time(elapsed: f64, duration: f64) -> f64 {
    let t = elapsed / duration;
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Eased sequence progress with the default smoothstep pacing.
///
/// Pins at exactly 1 once `elapsed >= duration`.
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    Ease::SmoothStep.apply(normalized_time(elapsed, duration))
}

/// Fixed-length, forward-only sequence timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    duration: f64,
    ease: Ease,
}

impl Timeline {
    pub fn new(duration: f64, ease: Ease) -> ChaseResult<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ChaseError::configuration(format!(
                "sequence duration must be finite and > 0, got {duration}"
            )));
        }
        Ok(Self { duration, ease })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn progress(&self, elapsed: f64) -> f64 {
        self.ease.apply(normalized_time(elapsed, self.duration))
    }

    /// Whether the sequence has reached its terminal pose.
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/timeline.rs"]
mod tests;
