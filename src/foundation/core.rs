use crate::foundation::error::{ChaseError, ChaseResult};

pub use glam::{DMat3, DQuat, DVec3};

/// Local axis a vehicle points along when its orientation is identity.
pub const FORWARD: DVec3 = DVec3::Z;

/// World up axis.
pub const UP: DVec3 = DVec3::Y;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Fixed frame rate used to step a sequence offline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> ChaseResult<Self> {
        if den == 0 {
            return Err(ChaseError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ChaseError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Delta time of one frame, in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of frame `frames`, computed directly rather than by summing frame durations.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frame steps needed to cover `secs`, rounding up so the last step lands at or
    /// past the requested time.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        // Tolerate float noise so exact multiples don't gain an extra frame.
        let frames = secs * self.as_f64();
        (frames - 1e-9).ceil().max(0.0) as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
