use crate::curve::spline::{ControlPointSet, CurveKind, Spline};
use crate::foundation::core::DVec3;
use crate::foundation::error::{ChaseError, ChaseResult};

/// Authored description of one path, as it appears in a scene config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathSpec {
    pub points: Vec<DVec3>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub curve: CurveKind,
}

impl PathSpec {
    pub fn new(points: Vec<DVec3>, curve: CurveKind) -> Self {
        Self {
            points,
            closed: false,
            curve,
        }
    }

    /// Build the spline, prefixing configuration errors with the path `name`.
    pub fn build(&self, name: &str) -> ChaseResult<Spline> {
        ControlPointSet::new(self.points.clone())
            .and_then(|points| Spline::new(points, self.closed, self.curve))
            .map_err(|e| match e {
                ChaseError::Configuration(msg) => {
                    ChaseError::configuration(format!("{name} path: {msg}"))
                }
                other => other,
            })
    }
}

/// The three authored paths of the chase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathSet {
    pub target: PathSpec,
    pub chaser: PathSpec,
    pub ambient: PathSpec,
}

impl Default for PathSet {
    fn default() -> Self {
        fn pts(raw: &[[f64; 3]]) -> Vec<DVec3> {
            raw.iter().copied().map(DVec3::from_array).collect()
        }

        Self {
            target: PathSpec::new(
                pts(&[
                    [-18.0, 3.0, -24.0],
                    [-12.0, 6.0, -6.0],
                    [-6.0, 5.0, 6.0],
                    [2.0, 2.0, 14.0],
                    [8.0, 4.0, 26.0],
                    [16.0, 7.0, 32.0],
                    [24.0, 4.0, 44.0],
                ]),
                CurveKind::CatmullRom { tension: 0.5 },
            ),
            // Shadows the target path slightly behind and below, never a rigid copy.
            chaser: PathSpec::new(
                pts(&[
                    [-20.0, 2.0, -28.0],
                    [-14.0, 4.0, -10.0],
                    [-7.0, 3.5, 4.0],
                    [1.0, 1.2, 12.0],
                    [8.0, 3.8, 22.0],
                    [14.0, 5.5, 30.0],
                    [20.0, 3.0, 40.0],
                ]),
                CurveKind::CatmullRom { tension: 0.65 },
            ),
            ambient: PathSpec::new(
                pts(&[
                    [-40.0, -4.0, -60.0],
                    [-10.0, 12.0, -30.0],
                    [18.0, -6.0, -10.0],
                    [-14.0, 4.0, 10.0],
                    [20.0, 10.0, 30.0],
                    [-8.0, -2.0, 60.0],
                ]),
                CurveKind::Centripetal,
            ),
        }
    }
}

impl PathSet {
    pub fn build(&self) -> ChaseResult<ChasePaths> {
        Ok(ChasePaths {
            target: self.target.build("target")?,
            chaser: self.chaser.build("chaser")?,
            ambient: self.ambient.build("ambient")?,
        })
    }
}

/// Built, immutable curves. Constructed once per scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ChasePaths {
    pub target: Spline,
    pub chaser: Spline,
    pub ambient: Spline,
}

#[cfg(test)]
#[path = "../../tests/unit/curve/paths.rs"]
mod tests;
