use rand::Rng;
use rand::rngs::StdRng;

use crate::ambient::{STREAK_SALT, pick, seeded_rng, spread};
use crate::foundation::core::DVec3;
use crate::foundation::error::{ChaseError, ChaseResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub count: usize,
    /// Full lateral width of the spawn area (x).
    pub width: f64,
    /// Full vertical height of the spawn area (y).
    pub height: f64,
    /// Depth a recycled streak restarts at.
    pub far_start: f64,
    /// Depth past which a streak is recycled.
    pub near_limit: f64,
    pub length: [f64; 2],
    pub speed: [f64; 2],
    /// Cross-section of the streak box.
    pub thickness: f64,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            count: 160,
            width: 80.0,
            height: 40.0,
            far_start: -150.0,
            near_limit: 10.0,
            length: [4.0, 12.0],
            speed: [20.0, 50.0],
            thickness: 0.08,
        }
    }
}

impl StreakConfig {
    pub fn validate(&self) -> ChaseResult<()> {
        let scalars = [
            self.width,
            self.height,
            self.far_start,
            self.near_limit,
            self.thickness,
        ];
        if scalars.iter().any(|v| !v.is_finite()) {
            return Err(ChaseError::configuration(
                "streak parameters must be finite",
            ));
        }
        if self.near_limit <= self.far_start {
            return Err(ChaseError::configuration(
                "streak near_limit must lie past far_start",
            ));
        }
        for (name, [lo, hi]) in [("length", self.length), ("speed", self.speed)] {
            if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi) {
                return Err(ChaseError::configuration(format!(
                    "streak {name} range must be finite, non-negative and ordered"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Streak {
    pub position: DVec3,
    pub length: f64,
    pub speed: f64,
}

/// Per-instance transform for a unit box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StreakInstance {
    pub translation: DVec3,
    pub scale: DVec3,
}

/// Fixed pool of speed streaks flowing toward the viewer. Streaks are recycled in place.
#[derive(Clone, Debug)]
pub struct StreakField {
    cfg: StreakConfig,
    seed: u64,
    rng: StdRng,
    streaks: Vec<Streak>,
    recycled: u64,
}

impl StreakField {
    pub fn new(cfg: StreakConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed, STREAK_SALT);
        let streaks = (0..cfg.count)
            .map(|_| {
                let x = spread(&mut rng, cfg.width);
                let y = spread(&mut rng, cfg.height);
                let z = rng.random::<f64>() * cfg.far_start;
                let length = pick(&mut rng, cfg.length);
                let speed = pick(&mut rng, cfg.speed);
                Streak {
                    position: DVec3::new(x, y, z),
                    length,
                    speed,
                }
            })
            .collect();
        Self {
            cfg,
            seed,
            rng,
            streaks,
            recycled: 0,
        }
    }

    /// Move every streak by `speed * dt`; any streak past `near_limit` restarts at `far_start`
    /// with a fresh lateral position in the same call. Returns how many were recycled.
    pub fn advance(&mut self, dt: f64) -> usize {
        if !(dt.is_finite() && dt > 0.0) {
            return 0;
        }
        let mut recycled = 0;
        for streak in &mut self.streaks {
            streak.position.z += streak.speed * dt;
            if streak.position.z > self.cfg.near_limit {
                streak.position = DVec3::new(
                    spread(&mut self.rng, self.cfg.width),
                    spread(&mut self.rng, self.cfg.height),
                    self.cfg.far_start,
                );
                recycled += 1;
            }
        }
        self.recycled += recycled as u64;
        if recycled > 0 {
            tracing::trace!(recycled, "streaks recycled");
        }
        recycled
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    /// Total recycles since construction or the last reset.
    pub fn recycled_total(&self) -> u64 {
        self.recycled
    }

    pub fn instances(&self) -> impl Iterator<Item = StreakInstance> + '_ {
        let t = self.cfg.thickness;
        self.streaks.iter().map(move |s| StreakInstance {
            translation: s.position,
            scale: DVec3::new(t, t, s.length),
        })
    }

    /// Regenerate the initial pool from the construction seed.
    pub fn reset(&mut self) {
        *self = Self::new(self.cfg, self.seed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ambient/streaks.rs"]
mod tests;
