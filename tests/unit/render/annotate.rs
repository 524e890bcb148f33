use super::*;
use crate::render::text::FontBook;

fn run(captions: Captions<'_>) -> RenderLayer {
    let mut base = RenderLayer::transparent(200, 400);
    base.set_pixel(10, 300, [255, 255, 255, 255]);
    let mut anchors = AnchorMap::new();
    anchors.insert("front_wheel".to_owned(), Point::new(100.0, 200.0));
    let mut text = TextEngine::new(&FontBook::empty());
    annotate(
        &base,
        BoundingBox::new(20.0, 150.0, 180.0, 250.0),
        &anchors,
        captions,
        &AnnotationStyle::default(),
        &mut text,
    )
    .unwrap()
}

const SIDE: Captions<'static> = Captions {
    label: "Side",
    instruction: "Align",
};

#[test]
fn keeps_underlying_pixels() {
    let out = run(SIDE);
    assert_eq!(out.pixel(10, 300), Some([255, 255, 255, 255]));
    assert_eq!(out.pixel(0, 320).unwrap()[3], 0);
}

#[test]
fn draws_faint_reticle_through_center() {
    let out = run(SIDE);
    let v = out.pixel(100, 100).unwrap();
    assert!(v[3].abs_diff(15) <= 1);
    let hz = out.pixel(20, 200).unwrap();
    assert!(hz[3].abs_diff(15) <= 1);
}

#[test]
fn brackets_sit_outside_the_padded_bbox() {
    let out = run(SIDE);
    // Top-left frame corner is (8, 138); the arm runs right along y = 138.
    assert!(out.pixel(60, 137).unwrap()[3] >= 150);
    assert!(out.pixel(7, 160).unwrap()[3] >= 150);
    // Between the top arms the frame edge stays clear.
    assert_eq!(out.pixel(90, 137).unwrap()[3], 0);
}

#[test]
fn anchors_get_green_crosshairs() {
    let out = run(SIDE);
    let arm = out.pixel(100, 190).unwrap();
    assert!(arm[3] > 0);
    assert!(arm[1] > arm[0]);
}

#[test]
fn label_chip_is_dark_and_centered() {
    let out = run(SIDE);
    let chip = out.pixel(60, 40).unwrap();
    assert!(chip[3].abs_diff(140) <= 2);
    assert!(chip[0] < 10);
    assert_eq!(out.pixel(20, 40).unwrap()[3], 0);
}

#[test]
fn empty_captions_draw_no_chips() {
    let out = run(Captions {
        label: "",
        instruction: " ",
    });
    assert_eq!(out.pixel(60, 40).unwrap()[3], 0);
}

#[test]
fn bracket_arms_point_inward() {
    let arms = bracket_arms(BoundingBox::new(0.0, 0.0, 100.0, 50.0), 10.0);
    assert_eq!(arms[0][1], Point::new(0.0, 0.0));
    assert_eq!(arms[2], [
        Point::new(90.0, 50.0),
        Point::new(100.0, 50.0),
        Point::new(100.0, 40.0),
    ]);
}
