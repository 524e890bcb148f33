use super::*;

fn square_input() -> RasterInput {
    RasterInput {
        outlines: vec![
            vec![Point::new(10.0, 40.0), Point::new(10.0, 10.0), Point::new(50.0, 10.0)],
            vec![Point::new(50.0, 10.0), Point::new(50.0, 40.0), Point::new(10.0, 40.0)],
        ],
        windows: vec![vec![Point::new(20.0, 20.0), Point::new(40.0, 20.0)]],
        details: vec![],
        wheels: vec![WheelSpec {
            center: Point::new(30.0, 52.0),
            rx: 6.0,
            ry: 6.0,
        }],
    }
}

#[test]
fn schedule_widens_and_fades() {
    let style = GlowStyle::default();
    let passes = glow_schedule(2.0, &style);

    assert_eq!(passes.len(), 4);
    assert_eq!(passes[0].width, 5.0);
    assert_eq!(passes[3].width, 14.0);
    assert!((passes[0].alpha - 0.25).abs() < 1e-6);
    for pair in passes.windows(2) {
        assert!(pair[1].width >= pair[0].width);
        assert!(pair[1].alpha <= pair[0].alpha);
    }
}

#[test]
fn schedule_with_no_passes_is_empty() {
    let style = GlowStyle {
        passes: 0,
        ..GlowStyle::default()
    };
    assert!(glow_schedule(2.0, &style).is_empty());
}

#[test]
fn render_fills_haze_and_leaves_margins_clear() {
    let canvas = Canvas::new(64, 64).unwrap();
    let layer = render(
        &square_input(),
        canvas,
        &StrokeStyle::default(),
        &GlowStyle::default(),
    )
    .unwrap();

    // Interior of the body loop carries only the faint haze.
    let haze = layer.pixel(30, 30).unwrap();
    assert!(haze[3].abs_diff(20) <= 1);
    // Crisp stroke sits on top of the glow.
    assert!(layer.pixel(30, 10).unwrap()[3] >= 200);
    // Glow reaches beyond the stroke.
    assert!(layer.pixel(30, 5).unwrap()[3] > 0);
    assert_eq!(layer.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(layer.pixel(63, 0).unwrap()[3], 0);
}

#[test]
fn render_is_deterministic() {
    let canvas = Canvas::new(64, 64).unwrap();
    let a = render(&square_input(), canvas, &StrokeStyle::default(), &GlowStyle::default()).unwrap();
    let b = render(&square_input(), canvas, &StrokeStyle::default(), &GlowStyle::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn extent_points_include_wheel_extremes() {
    let pts = square_input().extent_points();
    assert!(pts.contains(&Point::new(24.0, 46.0)));
    assert!(pts.contains(&Point::new(36.0, 58.0)));
}

#[test]
fn ambient_glow_only_touches_transparent_pixels() {
    let mut layer = RenderLayer::transparent(32, 32);
    for x in 8..24 {
        layer.set_pixel(x, 16, [255, 255, 255, 220]);
    }
    let out = ambient_glow(&layer, &AmbientGlow::default()).unwrap();

    for x in 8..24 {
        assert_eq!(out.pixel(x, 16), Some([255, 255, 255, 220]));
    }
    let halo = out.pixel(16, 17).unwrap();
    assert_eq!(&halo[..3], &[100, 200, 255]);
    assert!(halo[3] > 0);
    assert_eq!(out.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn ambient_glow_with_zero_intensity_is_identity() {
    let mut layer = RenderLayer::transparent(8, 8);
    layer.set_pixel(4, 4, [255, 255, 255, 255]);
    let glow = AmbientGlow {
        intensity: 0.0,
        ..AmbientGlow::default()
    };
    assert_eq!(ambient_glow(&layer, &glow).unwrap(), layer);
    let bad = AmbientGlow {
        intensity: f32::NAN,
        ..AmbientGlow::default()
    };
    assert!(ambient_glow(&layer, &bad).is_err());
}
