/// Pacing curves mapping normalized sequence time to progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant velocity.
    Linear,
    /// `x²(3 - 2x)`: zero velocity at both ends.
    #[default]
    SmoothStep,
    /// `x³(x(6x - 15) + 10)`: zero velocity and acceleration at both ends.
    SmootherStep,
}

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::SmootherStep => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
        }
    }
}

/// The default sequence pacing curve.
pub fn smoothstep(t: f64) -> f64 {
    Ease::SmoothStep.apply(t)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/ease.rs"]
mod tests;
