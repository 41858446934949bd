use rand::Rng;

use crate::ambient::{NEBULA_SALT, pick, seeded_rng, spread};
use crate::curve::spline::Spline;
use crate::foundation::core::{DQuat, DVec3, UP};
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::foundation::math::hsl_to_rgb;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    pub count: usize,
    /// Full width of the scatter along the curve normal.
    pub normal_spread: f64,
    /// Full width of the scatter along the binormal.
    pub binormal_spread: f64,
    /// Full width of the scatter along the tangent.
    pub tangent_spread: f64,
    /// Whole-cloud angular velocity per axis, radians per second.
    pub spin: DVec3,
    pub hue: [f64; 2],
    pub saturation: [f64; 2],
    pub lightness: [f64; 2],
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            count: 1200,
            normal_spread: 14.0,
            binormal_spread: 10.0,
            tangent_spread: 10.0,
            spin: DVec3::new(0.008, -0.02, 0.0),
            hue: [0.58, 0.66],
            saturation: [0.6, 0.8],
            lightness: [0.32, 0.57],
        }
    }
}

impl NebulaConfig {
    pub fn validate(&self) -> ChaseResult<()> {
        let spreads = [self.normal_spread, self.binormal_spread, self.tangent_spread];
        if spreads.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ChaseError::configuration(
                "nebula spreads must be finite and >= 0",
            ));
        }
        if !self.spin.is_finite() {
            return Err(ChaseError::configuration("nebula spin must be finite"));
        }
        for (name, [lo, hi]) in [
            ("hue", self.hue),
            ("saturation", self.saturation),
            ("lightness", self.lightness),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(ChaseError::configuration(format!(
                    "nebula {name} range must be finite and ordered"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct NebulaPoint {
    pub position: DVec3,
    pub color: [f32; 3],
}

/// Static point cloud scattered in a tube around the ambient curve; only the whole cloud turns.
#[derive(Clone, Debug, PartialEq)]
pub struct NebulaCloud {
    cfg: NebulaConfig,
    points: Vec<NebulaPoint>,
    euler: DVec3,
}

impl NebulaCloud {
    #[tracing::instrument(skip(path, cfg), fields(count = cfg.count))]
    pub fn scatter(path: &Spline, cfg: &NebulaConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed, NEBULA_SALT);
        let mut points = Vec::with_capacity(cfg.count);

        for _ in 0..cfg.count {
            let u: f64 = rng.random();
            let point = path.point_at(u);
            let tangent = path.unit_tangent_at(u).unwrap_or(DVec3::Z);
            // A tangent parallel to `up` has no defined normal; any perpendicular axis works.
            let normal = tangent.cross(UP).try_normalize().unwrap_or(DVec3::X);
            let binormal = tangent.cross(normal).try_normalize().unwrap_or(UP);

            let position = point
                + normal * spread(&mut rng, cfg.normal_spread)
                + binormal * spread(&mut rng, cfg.binormal_spread)
                + tangent * spread(&mut rng, cfg.tangent_spread);

            let h = pick(&mut rng, cfg.hue);
            let s = pick(&mut rng, cfg.saturation);
            let l = pick(&mut rng, cfg.lightness);
            points.push(NebulaPoint {
                position,
                color: hsl_to_rgb(h, s, l),
            });
        }

        tracing::debug!(points = points.len(), "nebula scattered");
        Self {
            cfg: *cfg,
            points,
            euler: DVec3::ZERO,
        }
    }

    /// Turn the cloud by `spin * dt`.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.euler += self.cfg.spin * dt;
        }
    }

    pub fn points(&self) -> &[NebulaPoint] {
        &self.points
    }

    /// Accumulated XYZ Euler angles, radians.
    pub fn euler(&self) -> DVec3 {
        self.euler
    }

    /// Cloud rotation, X then Y then Z applied in the cloud's local frame.
    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_x(self.euler.x)
            * DQuat::from_rotation_y(self.euler.y)
            * DQuat::from_rotation_z(self.euler.z)
    }

    /// Point `i` with the current cloud rotation applied.
    pub fn world_position(&self, i: usize) -> Option<DVec3> {
        let p = self.points.get(i)?;
        Some(self.rotation() * p.position)
    }

    pub fn reset(&mut self) {
        self.euler = DVec3::ZERO;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ambient/nebula.rs"]
mod tests;
