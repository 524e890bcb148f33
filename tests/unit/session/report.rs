use super::*;
use crate::foundation::core::Point;

fn sample() -> AnchorReport {
    let canvas = Canvas::new(200, 400).unwrap();
    let mut anchors = AnchorMap::new();
    anchors.insert("front_wheel".to_owned(), Point::new(36.0, 248.0));
    anchors.insert("a_pillar".to_owned(), Point::new(60.0, 168.0));

    let mut report = AnchorReport::new();
    report.insert("side_driver", &anchors, canvas);
    report.insert("rear_center", &AnchorMap::new(), canvas);
    report
}

#[test]
fn anchors_are_normalized() {
    let report = sample();
    assert_eq!(report.len(), 2);
    let side = report.get("side_driver").unwrap();
    assert_eq!(side["front_wheel"], [0.18, 0.62]);
    assert_eq!(side["a_pillar"], [0.3, 0.42]);
    assert!(report.get("rear_center").unwrap().is_empty());
    assert!(report.get("front_left_45").is_none());
}

#[test]
fn json_is_keyed_by_template_then_anchor() {
    let report = sample();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["side_driver"]["front_wheel"][0], 0.18);
    assert_eq!(value["side_driver"]["front_wheel"][1], 0.62);
    assert!(value["rear_center"].as_object().unwrap().is_empty());

    let back: AnchorReport = serde_json::from_value(value).unwrap();
    assert_eq!(back, report);
}

#[test]
fn text_lists_every_template() {
    let text = sample().to_text();
    assert!(text.contains("side_driver\n"));
    assert!(text.contains("front_wheel"));
    assert!(text.contains("0.1800 0.6200"));
    assert!(text.contains("rear_center\n  (no anchors)"));
}

#[test]
fn written_report_parses_back() {
    let dir = std::path::PathBuf::from("target").join("unit_report");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(ANCHOR_REPORT_FILE);
    sample().write_to(&path).unwrap();

    let back: AnchorReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, sample());
}
