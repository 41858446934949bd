use crate::foundation::core::{DMat3, DQuat, DVec3};

/// Fraction of the remaining gap to close this frame for a per-second `rate`.
///
/// `1 - exp(-rate * dt)`: two half-steps compose to exactly one full step, so the result does not
/// depend on how the time is sliced into frames.
#[inline]
pub fn exp_blend(rate: f64, dt: f64) -> f64 {
    if !(dt.is_finite() && dt > 0.0) || rate.is_nan() || rate <= 0.0 {
        return 0.0;
    }
    (1.0 - (-rate * dt).exp()).clamp(0.0, 1.0)
}

/// Per-second rate that closes `fraction` of the gap each frame at `reference_fps`.
pub fn rate_from_frame_fraction(fraction: f64, reference_fps: f64) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction >= 1.0 {
        return f64::INFINITY;
    }
    -(1.0 - fraction).ln() * reference_fps
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One low-pass step from `current` toward `goal`, renormalized. A zero blend returns `current`
/// untouched.
pub fn damp_rotation(current: DQuat, goal: DQuat, blend: f64) -> DQuat {
    if blend.is_nan() || blend <= 0.0 {
        return current;
    }
    current.slerp(goal, blend.clamp(0.0, 1.0)).normalize()
}

/// Minimal rotation taking unit `from` onto unit `to`.
pub fn shortest_arc(from: DVec3, to: DVec3) -> DQuat {
    DQuat::from_rotation_arc(from, to)
}

/// Orientation for an observer at `eye` looking at `focus`, local -Z forward and +Y up.
///
/// Returns `None` when `eye` and `focus` coincide.
pub fn look_at_rotation(eye: DVec3, focus: DVec3, up: DVec3) -> Option<DQuat> {
    let mut z = (eye - focus).try_normalize()?;
    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // Looking straight along `up`; nudge off the pole.
        if up.z.abs() > 0.999 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.try_normalize()?;
    let y = z.cross(x);
    Some(DQuat::from_mat3(&DMat3::from_cols(x, y, z)).normalize())
}

/// HSL (all components in `[0, 1]`, hue wrapping) to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f32; 3] {
    fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    }

    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l as f32; 3];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0) as f32,
        hue_to_rgb(p, q, h) as f32,
        hue_to_rgb(p, q, h - 1.0 / 3.0) as f32,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
