use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::ambient::nebula::NebulaConfig;
use crate::ambient::stars::StarConfig;
use crate::ambient::streaks::StreakConfig;
use crate::curve::paths::PathSet;
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::foundation::math::rate_from_frame_fraction;
use crate::pose::craft::CraftPair;
use crate::pose::entity::ChaserSchedule;
use crate::rig::camera::RigConfig;
use crate::timing::ease::Ease;

/// Frame rate the default damping fractions were tuned at.
pub const REFERENCE_FPS: f64 = 60.0;

/// Per-second damping rates, fed to `1 - exp(-rate * dt)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DampingConfig {
    pub target_align: f64,
    pub chaser_align: f64,
    pub chaser_pursuit: f64,
    pub rig_follow: f64,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self::from_frame_fractions(0.25, 0.2, 0.1, 0.08, REFERENCE_FPS)
    }
}

impl DampingConfig {
    /// Rates that close the given share of the gap per frame at `reference_fps`.
    pub fn from_frame_fractions(
        target_align: f64,
        chaser_align: f64,
        chaser_pursuit: f64,
        rig_follow: f64,
        reference_fps: f64,
    ) -> Self {
        Self {
            target_align: rate_from_frame_fraction(target_align, reference_fps),
            chaser_align: rate_from_frame_fraction(chaser_align, reference_fps),
            chaser_pursuit: rate_from_frame_fraction(chaser_pursuit, reference_fps),
            rig_follow: rate_from_frame_fraction(rig_follow, reference_fps),
        }
    }

    pub fn validate(&self) -> ChaseResult<()> {
        for (name, rate) in [
            ("target_align", self.target_align),
            ("chaser_align", self.chaser_align),
            ("chaser_pursuit", self.chaser_pursuit),
            ("rig_follow", self.rig_follow),
        ] {
            if rate.is_nan() || rate < 0.0 {
                return Err(ChaseError::configuration(format!(
                    "damping rate {name} must be >= 0 (got {rate})"
                )));
            }
        }
        Ok(())
    }
}

/// Everything needed to build a [`crate::ChaseScene`]. Every field has a default, so `{}` is a
/// valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Sequence length in seconds.
    pub duration: f64,
    /// Seed for the ambient generators.
    pub seed: u64,
    pub pacing: Ease,
    pub paths: PathSet,
    pub chaser: ChaserSchedule,
    pub damping: DampingConfig,
    pub rig: RigConfig,
    pub nebula: NebulaConfig,
    pub streaks: StreakConfig,
    pub stars: StarConfig,
    pub crafts: CraftPair,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            duration: 20.0,
            seed: 0x00c0_ffee,
            pacing: Ease::default(),
            paths: PathSet::default(),
            chaser: ChaserSchedule::default(),
            damping: DampingConfig::default(),
            rig: RigConfig::default(),
            nebula: NebulaConfig::default(),
            streaks: StreakConfig::default(),
            stars: StarConfig::default(),
            crafts: CraftPair::default(),
        }
    }
}

impl SceneConfig {
    /// Parse from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChaseResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChaseError::serde(format!("parse scene config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> ChaseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> ChaseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every scalar section. Paths and crafts are checked when they are built.
    pub fn validate(&self) -> ChaseResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ChaseError::configuration(format!(
                "duration must be finite and > 0 (got {})",
                self.duration
            )));
        }
        self.chaser.validate()?;
        self.damping.validate()?;
        self.rig.validate()?;
        self.nebula.validate()?;
        self.streaks.validate()?;
        self.stars.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
