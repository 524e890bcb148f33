use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 70_000).is_err());
    assert_eq!(Canvas::new(1080, 1920).unwrap(), Canvas::REFERENCE);
}

#[test]
fn canvas_normalize_divides_by_dimensions() {
    let c = Canvas::REFERENCE;
    let [x, y] = c.normalize(Point::new(540.0, 480.0));
    assert!((x - 0.5).abs() < 1e-12);
    assert!((y - 0.25).abs() < 1e-12);
}

#[test]
fn color_parses_hex_and_arrays() {
    assert_eq!(Rgba8::parse_hex("#64B4FF").unwrap(), Rgba8::rgb(100, 180, 255));
    assert_eq!(
        Rgba8::parse_hex("00dc78b4").unwrap(),
        Rgba8::new(0, 220, 120, 180)
    );
    assert!(Rgba8::parse_hex("#fff").is_err());

    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    let c: Rgba8 = serde_json::from_str("\"#ffffff28\"").unwrap();
    assert_eq!(c, Rgba8::new(255, 255, 255, 40));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn scale_alpha_clamps_factor() {
    let c = Rgba8::new(10, 20, 30, 200);
    assert_eq!(c.scale_alpha(0.5).a, 100);
    assert_eq!(c.scale_alpha(2.0).a, 200);
    assert_eq!(c.scale_alpha(-1.0).a, 0);
}

#[test]
fn bounding_box_expand_and_map() {
    let b = BoundingBox::new(30.0, 40.0, 10.0, 20.0);
    assert_eq!((b.x1, b.y1, b.x2, b.y2), (10.0, 20.0, 30.0, 40.0));

    let e = b.expand(5.0);
    assert_eq!((e.x1, e.y1, e.x2, e.y2), (5.0, 15.0, 35.0, 45.0));
    assert!(e.contains(Point::new(5.0, 45.0)));
    assert!(!e.contains(Point::new(4.9, 20.0)));

    let flipped = b.map_corners(|p| Point::new(100.0 - p.x, p.y));
    assert_eq!((flipped.x1, flipped.x2), (70.0, 90.0));
}
