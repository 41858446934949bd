use super::*;

#[test]
fn default_paths_build() {
    let paths = PathSet::default().build().unwrap();
    assert_eq!(paths.target.segment_count(), 6);
    assert_eq!(paths.chaser.segment_count(), 6);
    assert_eq!(paths.ambient.segment_count(), 5);
    assert_eq!(paths.ambient.kind(), CurveKind::Centripetal);
    assert_eq!(paths.target.point_at(0.0), DVec3::new(-18.0, 3.0, -24.0));
}

#[test]
fn degenerate_path_error_names_the_path() {
    let mut set = PathSet::default();
    set.chaser.points.truncate(1);
    let err = set.build().unwrap_err();
    assert!(err.is_configuration());
    let msg = err.to_string();
    assert!(msg.contains("chaser path"), "{msg}");
    assert!(msg.contains("got 1"), "{msg}");
}

#[test]
fn path_spec_json_defaults_curve_and_closed() {
    let spec: PathSpec = serde_json::from_str(r#"{ "points": [[0, 0, 0], [1, 2, 3]] }"#).unwrap();
    assert!(!spec.closed);
    assert_eq!(spec.curve, CurveKind::CatmullRom { tension: 0.5 });
    assert_eq!(spec.points[1], DVec3::new(1.0, 2.0, 3.0));

    let spec: PathSpec = serde_json::from_str(
        r#"{ "points": [[0, 0, 0], [1, 0, 0]], "closed": true, "curve": { "kind": "centripetal" } }"#,
    )
    .unwrap();
    assert!(spec.closed);
    assert_eq!(spec.curve, CurveKind::Centripetal);
}

#[test]
fn catmull_rom_tension_round_trips_through_json() {
    let json = serde_json::to_string(&CurveKind::CatmullRom { tension: 0.65 }).unwrap();
    assert_eq!(json, r#"{"kind":"catmull_rom","tension":0.65}"#);
}
