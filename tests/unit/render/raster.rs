use super::*;

#[test]
fn rejects_zero_and_oversized_dimensions() {
    assert!(Painter::with_size(0, 10).is_err());
    assert!(Painter::with_size(70_000, 10).is_err());
    assert!(Painter::with_size(8, 8).is_ok());
}

#[test]
fn untouched_painter_is_transparent() {
    let layer = Painter::with_size(16, 12).unwrap().finish().unwrap();
    assert_eq!((layer.width(), layer.height()), (16, 12));
    assert!(layer.is_transparent());
}

#[test]
fn filled_polygon_covers_interior_only() {
    let mut p = Painter::with_size(20, 20).unwrap();
    let square = [
        Point::new(2.0, 2.0),
        Point::new(18.0, 2.0),
        Point::new(18.0, 18.0),
        Point::new(2.0, 18.0),
    ];
    p.fill_polygon(&square, Rgba8::new(255, 255, 255, 128));
    let layer = p.finish().unwrap();

    let inside = layer.pixel(10, 10).unwrap();
    assert!(inside[3].abs_diff(128) <= 1);
    assert!(inside[0] >= 253);
    assert_eq!(layer.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn stroke_touches_pixels_along_the_line() {
    let mut p = Painter::with_size(32, 8).unwrap();
    p.stroke_line(
        Point::new(2.0, 4.0),
        Point::new(30.0, 4.0),
        2.0,
        Rgba8::WHITE,
    );
    let layer = p.finish().unwrap();

    assert!(layer.pixel(16, 3).unwrap()[3] > 200);
    assert_eq!(layer.pixel(16, 0).unwrap()[3], 0);
}

#[test]
fn degenerate_inputs_draw_nothing() {
    let mut p = Painter::with_size(8, 8).unwrap();
    p.stroke_polyline(&[Point::new(4.0, 4.0)], false, 2.0, Rgba8::WHITE);
    p.fill_polygon(&[], Rgba8::WHITE);
    p.stroke_line(Point::new(1.0, 1.0), Point::new(7.0, 7.0), 2.0, Rgba8::TRANSPARENT);
    assert!(p.finish().unwrap().is_transparent());
}
