use super::*;
use crate::foundation::core::DQuat;

#[test]
fn colors_parse_and_print_as_hex() {
    let c = Rgb8::try_from("#5ef4ff".to_owned()).unwrap();
    assert_eq!(c, Rgb8([0x5e, 0xf4, 0xff]));
    assert_eq!(String::from(c), "#5ef4ff");

    for bad in ["5ef4ff", "#5ef4f", "#zzzzzz", "#5ef4ffff"] {
        assert!(Rgb8::try_from(bad.to_owned()).unwrap_err().is_configuration());
    }
}

#[test]
fn spec_colors_round_trip_through_json() {
    let spec = CraftSpec::valkyrie();
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"#ff6536\""));
    let back: CraftSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn preset_colors_are_exact() {
    let specter = CraftSpec::specter();
    assert_eq!(String::from(specter.hull_color), "#5ef4ff");
    assert_eq!(String::from(specter.accent_color), "#75d5ff");
    assert_eq!(String::from(specter.engine_color), "#89faff");

    let valkyrie = CraftSpec::valkyrie();
    assert_eq!(valkyrie.hull_color, Rgb8::new(0xff, 0x65, 0x36));
    assert_eq!(String::from(valkyrie.accent_color), "#ffaf6d");
    assert_eq!(String::from(valkyrie.engine_color), "#ffdd93");
}

#[test]
fn engine_pulse_follows_time() {
    let engine = Engine {
        size: 1.6,
        color: Rgb8([0, 0, 0]),
    };
    let g0 = engine.glow(0.0);
    assert_eq!(g0.scale, DVec3::new(1.6, 1.6, 1.0));
    assert!((g0.emissive - 1.4).abs() < 1e-12);

    let t = std::f64::consts::FRAC_PI_2 / 12.0;
    let peak = engine.glow(t);
    assert!((peak.scale.z - 1.1).abs() < 1e-12);
    assert!((peak.scale.x - 1.76).abs() < 1e-12);

    for i in 0..200 {
        let g = engine.glow(f64::from(i) * 0.037);
        assert!((0.9..=1.1).contains(&g.scale.z));
        assert!((1.0..=1.8).contains(&g.emissive));
    }
}

#[test]
fn trail_keeps_newest_points_up_to_capacity() {
    let mut trail = Trail::new(0.6, 3);
    assert!(trail.is_empty());
    for i in 0..5 {
        trail.push(DVec3::splat(f64::from(i)));
    }
    assert_eq!(trail.len(), 3);
    assert_eq!(trail.head(), Some(DVec3::splat(4.0)));
    let pts: Vec<_> = trail.points().collect();
    assert_eq!(pts, vec![DVec3::splat(4.0), DVec3::splat(3.0), DVec3::splat(2.0)]);
    trail.clear();
    assert!(trail.is_empty());
}

#[test]
fn zero_capacity_trail_stays_empty() {
    let mut trail = Trail::new(1.0, 0);
    trail.push(DVec3::ONE);
    assert!(trail.is_empty());
    assert_eq!(trail.width_at(0), 0.0);
}

#[test]
fn trail_width_tapers_from_head() {
    let trail = Trail::new(0.8, 4);
    assert_eq!(trail.width_at(0), 0.8);
    assert!((trail.width_at(2) - 0.4).abs() < 1e-12);
    assert_eq!(trail.width_at(4), 0.0);
    assert!(trail.width_at(1) > trail.width_at(3));
    assert_eq!(trail.capacity(), 4);
}

#[test]
fn emitter_follows_pose_rotation_and_scale() {
    let craft = Craft::from_spec(&CraftSpec::specter()).unwrap();
    let pose = EntityState {
        position: DVec3::new(1.0, 2.0, 3.0),
        orientation: DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
    };
    // Local +Z maps to world +X under a quarter turn about Y.
    let expected = DVec3::new(1.0 + 0.8 * 1.3, 2.0, 3.0);
    assert!(craft.emitter_position(&pose).abs_diff_eq(expected, 1e-9));
}

#[test]
fn update_pulses_and_extends_trail() {
    let mut craft = Craft::from_spec(&CraftSpec::valkyrie()).unwrap();
    let mut pose = EntityState::default();
    for i in 0..40 {
        pose.position.z = f64::from(i);
        let glow = craft.update(&pose, f64::from(i) / 60.0);
        assert_eq!(glow, craft.glow());
    }
    assert_eq!(craft.trail.len(), 32);
    assert_eq!(craft.trail.head(), Some(DVec3::new(0.0, 0.0, 39.0 + 1.6)));
    craft.reset();
    assert!(craft.trail.is_empty());
}

#[test]
fn invalid_specs_are_rejected() {
    let mut spec = CraftSpec::specter();
    spec.scale = 0.0;
    assert!(Craft::from_spec(&spec).unwrap_err().is_configuration());

    let mut spec = CraftSpec::specter();
    spec.trail_offset = DVec3::new(f64::NAN, 0.0, 0.0);
    assert!(Craft::from_spec(&spec).unwrap_err().is_configuration());
}
