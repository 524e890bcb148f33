use super::*;

#[test]
fn straight_constructor_checks_length() {
    assert!(RenderLayer::from_straight(2, 2, vec![0; 16]).is_ok());
    let err = RenderLayer::from_straight(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, GhostError::Validation(_)));
}

#[test]
fn premul_input_is_unpremultiplied() {
    let layer = RenderLayer::from_premul(1, 1, vec![64, 64, 64, 64]).unwrap();
    assert_eq!(layer.pixel(0, 0), Some([255, 255, 255, 64]));
}

#[test]
fn pixel_access_respects_bounds() {
    let mut layer = RenderLayer::transparent(3, 2);
    layer.set_pixel(2, 1, [1, 2, 3, 4]);
    layer.set_pixel(3, 0, [9, 9, 9, 9]);

    assert_eq!(layer.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(layer.pixel(3, 0), None);
    assert_eq!(layer.coverage(), 1);
    assert_eq!(layer.alpha(), vec![0, 0, 0, 0, 0, 4]);
}

#[test]
fn composite_requires_matching_sizes() {
    let mut dst = RenderLayer::transparent(2, 2);
    assert!(dst.composite_over(&RenderLayer::transparent(2, 3)).is_err());

    let mut src = RenderLayer::transparent(2, 2);
    src.set_pixel(0, 0, [10, 20, 30, 255]);
    dst.composite_over(&src).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn image_conversion_keeps_bytes() {
    let mut layer = RenderLayer::transparent(2, 1);
    layer.set_pixel(1, 0, [5, 6, 7, 8]);
    let img = layer.to_image().unwrap();
    assert_eq!(img.get_pixel(1, 0).0, [5, 6, 7, 8]);
    assert_eq!(RenderLayer::from_image(img), layer);
}
