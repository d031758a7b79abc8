use rusty_signs::config::AppConfig;
use rusty_signs::expression;
use rusty_signs::gesture;

#[test]
fn verify_config_integrity() {
    // The committed config must parse and carry the stock calibration.
    let content = include_str!("../config.json");
    let config: AppConfig = serde_json::from_str(content).expect("config.json must parse");

    assert_eq!(
        config.thresholds.expression.smile_mouth_ratio,
        expression::SMILE_MOUTH_RATIO
    );
    assert_eq!(
        config.thresholds.expression.surprise_eyebrow_raise_px,
        expression::SURPRISE_EYEBROW_RAISE_PX
    );
    assert_eq!(
        config.thresholds.gesture.ok_pinch_distance,
        gesture::OK_PINCH_DISTANCE
    );
    assert_eq!(
        config.thresholds.gesture.heart_pinch_max,
        gesture::HEART_PINCH_MAX
    );
}

#[test]
fn default_config_exposes_threshold_sections() {
    let json = serde_json::to_string_pretty(&AppConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value["thresholds"]["expression"]["smile_mouth_ratio"].is_number());
    assert!(value["thresholds"]["gesture"]["heart_pinch_min"].is_number());
    assert!(value["defaults"]["mirror_mode"].is_boolean());
}
