use std::f64::consts::TAU;

use rand::Rng;

use crate::ambient::{STAR_SALT, seeded_rng};
use crate::foundation::core::DVec3;
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::foundation::math::hsl_to_rgb;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    /// Inner radius of the shell.
    pub radius: f64,
    /// Shell thickness.
    pub depth: f64,
    /// Size multiplier.
    pub factor: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 4000,
            radius: 120.0,
            depth: 60.0,
            factor: 4.0,
        }
    }
}

impl StarConfig {
    pub fn validate(&self) -> ChaseResult<()> {
        if [self.radius, self.depth, self.factor]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ChaseError::configuration(
                "star radius, depth and factor must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Star {
    pub position: DVec3,
    pub color: [f32; 3],
    pub size: f64,
}

/// Static spherical shell of stars. The radius walks inward from `radius + depth` as stars are
/// placed, so later stars sit slightly closer.
#[derive(Clone, Debug, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    #[tracing::instrument(skip(cfg), fields(count = cfg.count))]
    pub fn generate(cfg: &StarConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed, STAR_SALT);
        let count = cfg.count.max(1) as f64;
        let increment = cfg.depth / count;
        let mut r = cfg.radius + cfg.depth;

        let stars = (0..cfg.count)
            .map(|i| {
                r -= increment * rng.random::<f64>();
                let phi = (1.0 - 2.0 * rng.random::<f64>()).clamp(-1.0, 1.0).acos();
                let theta = TAU * rng.random::<f64>();
                let (sin_phi, cos_phi) = phi.sin_cos();
                let (sin_theta, cos_theta) = theta.sin_cos();
                let position = DVec3::new(
                    r * sin_phi * sin_theta,
                    r * cos_phi,
                    r * sin_phi * cos_theta,
                );
                let size = (0.5 + 0.5 * rng.random::<f64>()) * cfg.factor;
                Star {
                    position,
                    color: hsl_to_rgb(i as f64 / count, 1.0, 0.9),
                    size,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(stars = stars.len(), "star shell generated");
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ambient/stars.rs"]
mod tests;
