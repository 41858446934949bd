use super::*;
use crate::curve::spline::{CurveKind, build_spline};
use crate::foundation::math::rate_from_frame_fraction;

fn line(a: DVec3, b: DVec3) -> Spline {
    build_spline(vec![a, b], false, CurveKind::default()).unwrap()
}

fn bendy() -> Spline {
    build_spline(
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(5.0, 2.0, 8.0),
            DVec3::new(-3.0, 4.0, 15.0),
            DVec3::new(2.0, 1.0, 24.0),
        ],
        false,
        CurveKind::CatmullRom { tension: 0.5 },
    )
    .unwrap()
}

#[test]
fn target_sits_on_the_curve() {
    let path = bendy();
    let solver = TargetSolver::new(rate_from_frame_fraction(0.25, 60.0));
    let mut state = EntityState::default();
    let s = solver.solve(&mut state, &path, 0.0, 0.0);
    assert_eq!(state.position, DVec3::ZERO);
    assert_eq!(s.param, 0.0);

    solver.solve(&mut state, &path, 0.4, 1.0 / 60.0);
    assert_eq!(state.position, path.point_at(0.4));
}

#[test]
fn zero_delta_never_snaps_orientation() {
    let path = line(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
    let solver = TargetSolver::new(50.0);
    let mut state = EntityState::default();
    solver.solve(&mut state, &path, 0.5, 0.0);
    assert_eq!(state.orientation, DQuat::IDENTITY);
}

#[test]
fn target_orientation_converges_to_tangent() {
    let path = line(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
    let solver = TargetSolver::new(rate_from_frame_fraction(0.25, 60.0));
    let mut state = EntityState::default();
    let mut prev_err = f64::INFINITY;
    for _ in 0..240 {
        solver.solve(&mut state, &path, 0.5, 1.0 / 60.0);
        assert!(state.orientation.is_normalized());
        let err = state.forward().angle_between(DVec3::X);
        assert!(err <= prev_err + 1e-7, "orientation must approach monotonically");
        prev_err = err;
    }
    assert!(prev_err < 1e-6);
}

#[test]
fn first_blend_matches_frame_fraction_at_reference_rate() {
    let path = line(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
    let solver = TargetSolver::new(rate_from_frame_fraction(0.25, 60.0));
    let mut state = EntityState::default();
    solver.solve(&mut state, &path, 0.5, 1.0 / 60.0);
    let goal = shortest_arc(FORWARD, DVec3::X);
    let expected = DQuat::IDENTITY.slerp(goal, 0.25);
    assert!(state.orientation.abs_diff_eq(expected, 1e-9));
}

#[test]
fn degenerate_tangent_keeps_previous_orientation() {
    let p = DVec3::new(1.0, 1.0, 1.0);
    let path = line(p, p);
    let solver = TargetSolver::new(20.0);
    let tilted = shortest_arc(FORWARD, DVec3::new(0.3, 0.5, 0.8).normalize());
    let mut state = EntityState {
        position: DVec3::ZERO,
        orientation: tilted,
    };
    let sample = solver.solve(&mut state, &path, 0.7, 1.0 / 30.0);
    assert!(sample.heading.is_none());
    assert_eq!(state.position, p);
    assert_eq!(state.orientation, tilted);
    assert!(state.orientation.to_array().iter().all(|c| c.is_finite()));
}

#[test]
fn chaser_param_is_clamped_at_start_and_capped_at_end() {
    let s = ChaserSchedule::default();
    assert_eq!(s.sample_param(0.0), 0.0);
    assert_eq!(s.sample_param(0.05), 0.0);
    assert_eq!(s.sample_param(1.0), 0.995);
    assert!(s.sample_param(1.0) < 1.0);
}

#[test]
fn chaser_param_is_monotonic() {
    let s = ChaserSchedule::default();
    let mut prev = s.sample_param(0.0);
    for i in 1..=2000 {
        let v = s.sample_param(f64::from(i) / 2000.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn chaser_lagged_progress_trails_target() {
    let s = ChaserSchedule::default();
    for i in 0..=100 {
        let eased = f64::from(i) / 100.0;
        assert!(s.lagged(eased) <= eased);
        assert!(s.lagged(eased) >= 0.0);
    }
}

#[test]
fn schedule_validation_rejects_out_of_range_values() {
    assert!(ChaserSchedule::default().validate().is_ok());
    let bad = [
        ChaserSchedule {
            lag_offset: -0.1,
            ..ChaserSchedule::default()
        },
        ChaserSchedule {
            lag_offset: 1.0,
            ..ChaserSchedule::default()
        },
        ChaserSchedule {
            catch_up: 0.0,
            ..ChaserSchedule::default()
        },
        ChaserSchedule {
            max_param: 1.5,
            ..ChaserSchedule::default()
        },
        ChaserSchedule {
            max_param: f64::NAN,
            ..ChaserSchedule::default()
        },
    ];
    for s in bad {
        assert!(s.validate().unwrap_err().is_configuration(), "{s:?}");
    }
}

#[test]
fn pursuit_tilts_nose_toward_prey() {
    // Chaser flies along +Z; prey is off to the +X side.
    let path = line(DVec3::ZERO, DVec3::new(0.0, 0.0, 20.0));
    let prey = DVec3::new(10.0, 0.0, 10.0);
    let no_pursuit = ChaserSolver::new(ChaserSchedule::default(), 13.0, 0.0);
    let with_pursuit = ChaserSolver::new(ChaserSchedule::default(), 13.0, 6.0);

    let mut a = EntityState::default();
    let mut b = EntityState::default();
    for _ in 0..600 {
        no_pursuit.solve(&mut a, &path, 0.5, 1.0 / 60.0, prey);
        with_pursuit.solve(&mut b, &path, 0.5, 1.0 / 60.0, prey);
    }
    assert_eq!(a.position, b.position);
    assert!(a.forward().abs_diff_eq(FORWARD, 1e-6));
    // Path alignment dominates, pursuit is a nudge toward +X.
    let fb = b.forward();
    assert!(fb.x > 0.01);
    assert!(fb.z > fb.x);
    assert!(b.orientation.is_normalized());
}

#[test]
fn coincident_prey_skips_pursuit() {
    let path = line(DVec3::ZERO, DVec3::new(0.0, 0.0, 20.0));
    let solver = ChaserSolver::new(ChaserSchedule::default(), 13.0, 6.0);
    let mut state = EntityState::default();
    let sample = solver.solve(&mut state, &path, 0.0, 1.0 / 60.0, path.point_at(0.0));
    assert_eq!(sample.param, 0.0);
    assert!(state.orientation.is_normalized());
    assert!(state.forward().abs_diff_eq(FORWARD, 1e-9));
}
