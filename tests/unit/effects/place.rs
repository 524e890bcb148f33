use super::*;

fn filled(w: u32, h: u32, px: [u8; 4]) -> RenderLayer {
    RenderLayer::from_straight(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

#[test]
fn default_placement_is_identity() {
    let canvas = Canvas::new(16, 24).unwrap();
    let mut layer = RenderLayer::for_canvas(canvas);
    layer.set_pixel(3, 5, [255, 255, 255, 200]);
    layer.set_pixel(10, 20, [40, 80, 120, 255]);

    let (out, map) = place(&[&layer], canvas, &Placement::default()).unwrap();

    assert_eq!(out, layer);
    assert!(close(map.map_point(Point::new(7.0, 9.0)), Point::new(7.0, 9.0)));
}

#[test]
fn half_width_is_centered_and_mapped() {
    let canvas = Canvas::new(100, 200).unwrap();
    let layer = filled(100, 200, [255, 255, 255, 255]);
    let placement = Placement {
        width_fraction: 0.5,
        ..Placement::default()
    };
    let (out, map) = place(&[&layer], canvas, &placement).unwrap();

    assert_eq!(map.placed_size(), (50, 100));
    assert_eq!(map.paste_rect(), BoundingBox::new(25.0, 50.0, 75.0, 150.0));
    assert!(close(map.map_point(Point::new(0.0, 0.0)), Point::new(25.0, 50.0)));
    assert!(close(map.map_point(Point::new(100.0, 200.0)), Point::new(75.0, 150.0)));
    assert_eq!(out.pixel(50, 100).unwrap()[3], 255);
    assert_eq!(out.pixel(10, 10).unwrap()[3], 0);
}

#[test]
fn offsets_shift_the_paste_origin() {
    let canvas = Canvas::new(100, 100).unwrap();
    let layer = filled(50, 50, [255, 255, 255, 255]);
    let placement = Placement {
        width_fraction: 0.5,
        offset: [-0.03, 0.02],
        ..Placement::default()
    };
    let (_, map) = place(&[&layer], canvas, &placement).unwrap();
    assert_eq!(map.paste_rect(), BoundingBox::new(22.0, 27.0, 72.0, 77.0));
}

#[test]
fn flip_mirrors_points() {
    let canvas = Canvas::new(40, 20).unwrap();
    let mut layer = RenderLayer::for_canvas(canvas);
    layer.set_pixel(0, 0, [255, 255, 255, 255]);
    let placement = Placement {
        flip: true,
        ..Placement::default()
    };
    let (out, map) = place(&[&layer], canvas, &placement).unwrap();

    assert!(close(map.map_point(Point::new(0.0, 0.0)), Point::new(40.0, 0.0)));
    assert_eq!(out.pixel(39, 0).unwrap()[3], 255);
    assert_eq!(out.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn skew_squeezes_the_right_edge_and_clears_outside() {
    let canvas = Canvas::new(100, 200).unwrap();
    let layer = filled(100, 200, [255, 255, 255, 255]);
    let placement = Placement {
        skew: 0.6,
        ..Placement::default()
    };
    let (out, map) = place(&[&layer], canvas, &placement).unwrap();

    assert!(close(map.map_point(Point::new(100.0, 200.0)), Point::new(100.0, 182.0)));
    assert!(close(map.map_point(Point::new(100.0, 0.0)), Point::new(100.0, 18.0)));
    assert_eq!(out.pixel(99, 0).unwrap()[3], 0);
    assert_eq!(out.pixel(99, 199).unwrap()[3], 0);
    assert!(out.pixel(50, 100).unwrap()[3] >= 250);
    assert!(out.pixel(0, 0).unwrap()[3] >= 250);
}

#[test]
fn layers_composite_in_order() {
    let canvas = Canvas::new(8, 8).unwrap();
    let under = filled(8, 8, [255, 255, 255, 20]);
    let mut over = RenderLayer::for_canvas(canvas);
    over.set_pixel(4, 4, [255, 255, 255, 255]);

    let (out, _) = place(&[&under, &over], canvas, &Placement::default()).unwrap();
    assert_eq!(out.pixel(4, 4), Some([255, 255, 255, 255]));
    assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 20]));
}

#[test]
fn invalid_inputs_are_rejected() {
    let canvas = Canvas::new(8, 8).unwrap();
    let layer = RenderLayer::for_canvas(canvas);
    let zero = Placement {
        width_fraction: 0.0,
        ..Placement::default()
    };
    assert!(matches!(
        place(&[&layer], canvas, &zero),
        Err(GhostError::Validation(_))
    ));
    assert!(place(&[], canvas, &Placement::default()).is_err());
    let other = RenderLayer::transparent(4, 4);
    assert!(place(&[&layer, &other], canvas, &Placement::default()).is_err());
    let wild = Placement {
        skew: 5.0,
        ..Placement::default()
    };
    assert!(wild.validate().is_err());
}

#[test]
fn plan_matches_place_without_rasterizing() {
    let canvas = Canvas::new(120, 200).unwrap();
    let placement = Placement {
        width_fraction: 0.6,
        offset: [0.05, -0.02],
        flip: true,
        skew: 0.4,
    };
    let layer = filled(60, 40, [255, 255, 255, 255]);
    let (_, placed) = place(&[&layer], canvas, &placement).unwrap();
    let planned = plan(60, 40, canvas, &placement).unwrap();
    assert_eq!(planned, placed);

    assert!(matches!(
        plan(0, 40, canvas, &placement),
        Err(GhostError::Validation(_))
    ));
}
