use super::*;

#[test]
fn defaults() {
    let cfg = PlaybackConfig::default();
    assert!(!cfg.looping);
    assert!(!cfg.autoplay);
    assert_eq!(cfg.speed, 1.0);
    assert_eq!(cfg.controls, Controls::None);
    assert_eq!(PlaybackConfig::from_json(b"{}").unwrap(), cfg);
}

#[test]
fn parses_json_form() {
    let cfg = PlaybackConfig::from_json(
        br#"{"loop": true, "autoplay": true, "speed": 0.5, "controls": "toggle"}"#,
    )
    .unwrap();
    assert!(cfg.looping);
    assert!(cfg.autoplay);
    assert_eq!(cfg.speed, 0.5);
    assert_eq!(cfg.controls, Controls::External("toggle".to_owned()));

    let cfg = PlaybackConfig::from_json(br#"{"controls": true}"#).unwrap();
    assert_eq!(cfg.controls, Controls::Surface);
    let cfg = PlaybackConfig::from_json(br#"{"controls": false}"#).unwrap();
    assert_eq!(cfg.controls, Controls::None);
}

#[test]
fn invalid_json_is_configuration_error() {
    let err = PlaybackConfig::from_json(br#"{"speed": "fast"}"#).unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
}

#[test]
fn serializes_loop_key() {
    let json = serde_json::to_value(PlaybackConfig::new().with_loop(true)).unwrap();
    assert_eq!(json["loop"], true);
    assert_eq!(json["controls"], false);
}

#[test]
fn normalized_clamps_fast_speeds() {
    let cfg = PlaybackConfig::new().with_speed(2.5).normalized().unwrap();
    assert_eq!(cfg.speed, 1.0);
    let cfg = PlaybackConfig::new().with_speed(0.25).normalized().unwrap();
    assert_eq!(cfg.speed, 0.25);
}

#[test]
fn normalized_rejects_non_positive_speeds() {
    for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = PlaybackConfig::new().with_speed(speed).normalized().unwrap_err();
        assert!(matches!(err, ReelError::Configuration(_)), "{speed}");
    }
}
