use super::*;
use crate::foundation::core::{FORWARD, UP};

#[test]
fn exp_blend_is_zero_without_time() {
    assert_eq!(exp_blend(10.0, 0.0), 0.0);
    assert_eq!(exp_blend(10.0, -1.0), 0.0);
    assert_eq!(exp_blend(0.0, 1.0), 0.0);
    assert_eq!(exp_blend(10.0, f64::NAN), 0.0);
}

#[test]
fn exp_blend_composes_across_frame_slicing() {
    let rate = 7.5;
    let whole = exp_blend(rate, 0.1);
    let half = exp_blend(rate, 0.05);
    // Remaining gap after two half steps equals the remaining gap after one full step.
    let remaining_split = (1.0 - half) * (1.0 - half);
    assert!(((1.0 - whole) - remaining_split).abs() < 1e-12);
}

#[test]
fn rate_from_frame_fraction_reproduces_fraction_at_reference() {
    for f in [0.08, 0.1, 0.2, 0.25] {
        let rate = rate_from_frame_fraction(f, 60.0);
        assert!((exp_blend(rate, 1.0 / 60.0) - f).abs() < 1e-12);
    }
    assert_eq!(rate_from_frame_fraction(0.0, 60.0), 0.0);
    assert!(rate_from_frame_fraction(1.0, 60.0).is_infinite());
}

#[test]
fn damp_rotation_stays_unit_length() {
    let goal = shortest_arc(FORWARD, DVec3::new(1.0, 2.0, -0.5).normalize());
    let mut q = DQuat::IDENTITY;
    for _ in 0..200 {
        q = damp_rotation(q, goal, 0.13);
        assert!(q.is_normalized());
    }
    assert!(q.abs_diff_eq(goal, 1e-6) || q.abs_diff_eq(-goal, 1e-6));
}

#[test]
fn shortest_arc_handles_opposite_vectors() {
    let q = shortest_arc(FORWARD, -FORWARD);
    assert!(q.is_normalized());
    assert!((q * FORWARD).abs_diff_eq(-FORWARD, 1e-9));
}

#[test]
fn look_at_points_negative_z_at_focus() {
    let eye = DVec3::new(0.0, 3.0, 10.0);
    let focus = DVec3::new(4.0, 1.0, -2.0);
    let q = look_at_rotation(eye, focus, UP).unwrap();
    let view_dir = q * DVec3::NEG_Z;
    assert!(view_dir.abs_diff_eq((focus - eye).normalize(), 1e-9));
    // Camera up stays in the upper half space.
    assert!((q * DVec3::Y).y > 0.0);
}

#[test]
fn look_at_handles_degenerate_inputs() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    assert!(look_at_rotation(p, p, UP).is_none());

    let q = look_at_rotation(p, p - UP * 5.0, UP).unwrap();
    assert!(q.is_normalized());
    assert!((q * DVec3::NEG_Z).abs_diff_eq(-UP, 1e-3));
}

#[test]
fn hsl_primaries_and_grey() {
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
    let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
    assert!((green[1] - 1.0).abs() < 1e-6 && green[0].abs() < 1e-6);
    assert_eq!(hsl_to_rgb(0.7, 0.0, 0.25), [0.25, 0.25, 0.25]);
}

#[test]
fn zero_blend_is_exact_identity_map() {
    let q = DQuat::from_rotation_y(0.3);
    let goal = DQuat::from_rotation_x(1.1);
    assert_eq!(damp_rotation(q, goal, 0.0), q);
    assert_eq!(damp_rotation(DQuat::IDENTITY, goal, f64::NAN), DQuat::IDENTITY);
}
