use crate::curve::spline::Spline;
use crate::foundation::core::{DQuat, DVec3, FORWARD};
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::foundation::math::{damp_rotation, exp_blend, shortest_arc};

/// Pose of one moving entity. Owned by that entity's solver loop, never shared.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntityState {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Default for EntityState {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl EntityState {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// World direction of the entity's nose.
    pub fn forward(&self) -> DVec3 {
        self.orientation * FORWARD
    }

    /// Low-pass the orientation toward the rotation that points the nose along `dir`.
    fn align_toward(&mut self, dir: DVec3, blend: f64) {
        let goal = shortest_arc(FORWARD, dir);
        self.orientation = damp_rotation(self.orientation, goal, blend);
    }
}

/// One evaluation of a path: where, and which way it heads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub param: f64,
    pub position: DVec3,
    /// Unit tangent; `None` where the curve's derivative vanishes.
    pub heading: Option<DVec3>,
}

impl CurveSample {
    pub fn on(path: &Spline, param: f64) -> Self {
        let param = if param.is_nan() { 0.0 } else { param.clamp(0.0, 1.0) };
        Self {
            param,
            position: path.point_at(param),
            heading: path.unit_tangent_at(param),
        }
    }
}

/// Path-following solver for the lead vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSolver {
    pub align_rate: f64,
}

impl TargetSolver {
    pub fn new(align_rate: f64) -> Self {
        Self { align_rate }
    }

    /// Place `state` at `eased` on `path` and damp its nose toward the tangent.
    ///
    /// A degenerate tangent leaves last frame's orientation untouched.
    pub fn solve(&self, state: &mut EntityState, path: &Spline, eased: f64, dt: f64) -> CurveSample {
        let sample = CurveSample::on(path, eased);
        state.position = sample.position;
        if let Some(heading) = sample.heading {
            state.align_toward(heading, exp_blend(self.align_rate, dt));
        }
        sample
    }
}

/// How far behind the target the chaser runs, in progress space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChaserSchedule {
    /// Progress-space delay subtracted from the target's eased progress.
    pub lag_offset: f64,
    /// Scale on the lagged progress so the chaser closes in over the sequence.
    pub catch_up: f64,
    /// Upper bound on the chaser's sampling parameter, below the curve end.
    pub max_param: f64,
}

impl Default for ChaserSchedule {
    fn default() -> Self {
        Self {
            lag_offset: 0.065,
            catch_up: 1.08,
            max_param: 0.995,
        }
    }
}

impl ChaserSchedule {
    pub fn validate(&self) -> ChaseResult<()> {
        if !(self.lag_offset.is_finite() && (0.0..1.0).contains(&self.lag_offset)) {
            return Err(ChaseError::configuration(
                "chaser lag_offset must be in [0, 1)",
            ));
        }
        if !(self.catch_up.is_finite() && self.catch_up > 0.0) {
            return Err(ChaseError::configuration("chaser catch_up must be > 0"));
        }
        if !(self.max_param.is_finite() && self.max_param > 0.0 && self.max_param <= 1.0) {
            return Err(ChaseError::configuration(
                "chaser max_param must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// `max(eased - lag, 0)`: always at or behind the target's progress.
    pub fn lagged(&self, eased: f64) -> f64 {
        (eased - self.lag_offset).max(0.0)
    }

    /// Curve parameter the chaser samples at. Non-decreasing in `eased`, capped at `max_param`.
    pub fn sample_param(&self, eased: f64) -> f64 {
        (self.lagged(eased) * self.catch_up).min(self.max_param)
    }
}

/// Path-following plus pursuit solver for the chasing vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChaserSolver {
    pub schedule: ChaserSchedule,
    pub align_rate: f64,
    pub pursuit_rate: f64,
}

impl ChaserSolver {
    pub fn new(schedule: ChaserSchedule, align_rate: f64, pursuit_rate: f64) -> Self {
        Self {
            schedule,
            align_rate,
            pursuit_rate,
        }
    }

    /// Place `state` on `path` behind the target and blend its orientation in two passes:
    /// first toward its own tangent, then (lighter) toward `prey`.
    pub fn solve(
        &self,
        state: &mut EntityState,
        path: &Spline,
        eased: f64,
        dt: f64,
        prey: DVec3,
    ) -> CurveSample {
        let sample = CurveSample::on(path, self.schedule.sample_param(eased));
        state.position = sample.position;

        if let Some(heading) = sample.heading {
            state.align_toward(heading, exp_blend(self.align_rate, dt));
        }
        if let Some(pursuit) = (prey - sample.position).try_normalize() {
            state.align_toward(pursuit, exp_blend(self.pursuit_rate, dt));
        }
        sample
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/entity.rs"]
mod tests;
