use super::*;

#[test]
fn shell_radius_stays_within_depth() {
    let field = StarField::generate(&StarConfig::default(), 3);
    assert_eq!(field.len(), 4000);
    for star in field.stars() {
        let r = star.position.length();
        assert!((120.0 - 1e-9..=180.0 + 1e-9).contains(&r), "r = {r}");
        assert!((2.0..=4.0).contains(&star.size));
    }
}

#[test]
fn radius_shrinks_monotonically() {
    let field = StarField::generate(&StarConfig::default(), 9);
    let radii: Vec<f64> = field.stars().iter().map(|s| s.position.length()).collect();
    for w in radii.windows(2) {
        assert!(w[1] <= w[0] + 1e-9);
    }
}

#[test]
fn directions_cover_both_hemispheres() {
    let field = StarField::generate(&StarConfig::default(), 12);
    let above = field.stars().iter().filter(|s| s.position.y > 0.0).count();
    // Uniform on the sphere: roughly half above the equator.
    assert!((1700..2300).contains(&above), "above = {above}");
}

#[test]
fn colors_sweep_the_hue_wheel() {
    let field = StarField::generate(&StarConfig::default(), 1);
    let first = field.stars()[0].color;
    // Hue 0 at lightness 0.9 is a pale red.
    assert!((first[0] - 1.0).abs() < 1e-6);
    assert!((first[1] - 0.8).abs() < 1e-6);
    assert!((first[2] - 0.8).abs() < 1e-6);
    for star in field.stars() {
        assert!(star.color.iter().all(|c| (0.8 - 1e-6..=1.0 + 1e-6).contains(c)));
    }
}

#[test]
fn same_seed_same_shell() {
    let a = StarField::generate(&StarConfig::default(), 5);
    let b = StarField::generate(&StarConfig::default(), 5);
    let c = StarField::generate(&StarConfig::default(), 6);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn empty_shell() {
    let cfg = StarConfig {
        count: 0,
        ..StarConfig::default()
    };
    assert!(StarField::generate(&cfg, 0).is_empty());
}

#[test]
fn config_validation() {
    assert!(StarConfig::default().validate().is_ok());
    let bad = StarConfig {
        depth: -1.0,
        ..StarConfig::default()
    };
    assert!(bad.validate().unwrap_err().is_configuration());
}
