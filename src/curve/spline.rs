use crate::foundation::core::DVec3;
use crate::foundation::error::{ChaseError, ChaseResult};

/// Interpolation flavour of a Catmull-Rom family curve.
///
/// Only shapes the path between control points; every kind passes through all of them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveKind {
    /// Uniform knots, tangents scaled by `tension` (0.5 is the classic curve).
    CatmullRom { tension: f64 },
    /// Knot spacing `|Δp|^0.5`; no cusps or self-intersections within a segment.
    Centripetal,
    /// Knot spacing `|Δp|`.
    Chordal,
}

impl Default for CurveKind {
    fn default() -> Self {
        Self::CatmullRom { tension: 0.5 }
    }
}

/// Ordered, finite control points of one path. Holds at least two points.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ControlPointSet(Vec<DVec3>);

impl ControlPointSet {
    pub fn new(points: Vec<DVec3>) -> ChaseResult<Self> {
        if points.len() < 2 {
            return Err(ChaseError::configuration(format!(
                "a spline needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(ChaseError::configuration(format!(
                "control point {i} is not finite"
            )));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[DVec3] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> DVec3 {
        self.0[0]
    }

    pub fn last(&self) -> DVec3 {
        self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<DVec3>> for ControlPointSet {
    type Error = ChaseError;

    fn try_from(points: Vec<DVec3>) -> ChaseResult<Self> {
        Self::new(points)
    }
}

/// Build an interpolating spline through `points`.
///
/// Fails with a configuration error for fewer than two points; no spline is produced.
pub fn build_spline(
    points: impl Into<Vec<DVec3>>,
    closed: bool,
    kind: CurveKind,
) -> ChaseResult<Spline> {
    Spline::new(ControlPointSet::new(points.into())?, closed, kind)
}

/// Immutable interpolating curve over a [`ControlPointSet`].
///
/// The parameter `u` in `[0, 1]` advances uniformly per authored segment, not per unit of arc
/// length. Inputs outside the range are clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
    points: ControlPointSet,
    closed: bool,
    kind: CurveKind,
}

impl Spline {
    pub fn new(points: ControlPointSet, closed: bool, kind: CurveKind) -> ChaseResult<Self> {
        if let CurveKind::CatmullRom { tension } = kind
            && !tension.is_finite()
        {
            return Err(ChaseError::configuration("spline tension must be finite"));
        }
        Ok(Self {
            points,
            closed,
            kind,
        })
    }

    pub fn control_points(&self) -> &ControlPointSet {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Position on the curve at `u`.
    pub fn point_at(&self, u: f64) -> DVec3 {
        let (poly, w) = self.segment(u);
        poly.eval(w)
    }

    /// Analytic derivative `dP/du` at `u`. Not normalized; may be zero on degenerate input.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let (poly, w) = self.segment(u);
        poly.derivative(w) * self.segment_count() as f64
    }

    /// Unit direction of travel at `u`, or `None` where the derivative vanishes.
    pub fn unit_tangent_at(&self, u: f64) -> Option<DVec3> {
        self.tangent_at(u).try_normalize()
    }

    fn segment(&self, u: f64) -> (CubicPoly3, f64) {
        let pts = self.points.points();
        let n = pts.len();
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };

        let (p0, p1, p2, p3, w) = if self.closed {
            let p = n as f64 * u;
            let i = (p.floor() as usize).min(n);
            let w = p - i as f64;
            (
                pts[(i + n - 1) % n],
                pts[i % n],
                pts[(i + 1) % n],
                pts[(i + 2) % n],
                w,
            )
        } else {
            let p = (n - 1) as f64 * u;
            let mut i = p.floor() as usize;
            if i >= n - 1 {
                i = n - 2;
            }
            let w = p - i as f64;
            let p1 = pts[i];
            let p2 = pts[i + 1];
            let p0 = if i > 0 { pts[i - 1] } else { p1 * 2.0 - p2 };
            let p3 = if i + 2 < n {
                pts[i + 2]
            } else {
                p2 * 2.0 - p1
            };
            (p0, p1, p2, p3, w)
        };

        let poly = match self.kind {
            CurveKind::CatmullRom { tension } => {
                CubicPoly3::hermite(p1, p2, (p2 - p0) * tension, (p3 - p1) * tension)
            }
            CurveKind::Centripetal => CubicPoly3::nonuniform(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => CubicPoly3::nonuniform(p0, p1, p2, p3, 0.5),
        };
        (poly, w)
    }
}

/// `c0 + c1 w + c2 w² + c3 w³` over one segment.
#[derive(Clone, Copy, Debug)]
struct CubicPoly3 {
    c0: DVec3,
    c1: DVec3,
    c2: DVec3,
    c3: DVec3,
}

impl CubicPoly3 {
    fn hermite(x0: DVec3, x1: DVec3, t0: DVec3, t1: DVec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: x0 * -3.0 + x1 * 3.0 - t0 * 2.0 - t1,
            c3: x0 * 2.0 - x1 * 2.0 + t0 + t1,
        }
    }

    /// Knot spacing is `dist²^pow`.
    fn nonuniform(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, pow: f64) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(pow);
        let mut dt1 = p1.distance_squared(p2).powf(pow);
        let mut dt2 = p2.distance_squared(p3).powf(pow);

        // Coincident neighbours would divide by zero.
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
        Self::hermite(p1, p2, t1, t2)
    }

    fn eval(&self, w: f64) -> DVec3 {
        self.c0 + (self.c1 + (self.c2 + self.c3 * w) * w) * w
    }

    fn derivative(&self, w: f64) -> DVec3 {
        self.c1 + (self.c2 * 2.0 + self.c3 * (3.0 * w)) * w
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/spline.rs"]
mod tests;
