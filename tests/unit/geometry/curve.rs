use super::*;
use crate::silhouette::{ControlPolyline, PolylineRole};

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn open_curve_passes_through_endpoints() {
    let control = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, -5.0), (30.0, 0.0)]);
    let out = CurveSmoother::default().smooth(&control, false);

    assert_eq!(out.first(), control.first());
    assert_eq!(out.last(), control.last());
    assert_eq!(out.len(), 3 * DEFAULT_SAMPLES_PER_SEGMENT + 1);
}

#[test]
fn open_curve_hits_interior_control_points() {
    let control = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, -5.0), (30.0, 0.0)]);
    let out = CurveSmoother::new(8).smooth(&control, false);

    // Segment k starts at sample index k * samples.
    assert_eq!(out[8], control[1]);
    assert_eq!(out[16], control[2]);
}

#[test]
fn closed_curve_starts_and_ends_on_same_point() {
    let control = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let out = CurveSmoother::new(10).smooth(&control, true);

    assert_eq!(out.len(), 4 * 10 + 1);
    assert_eq!(out.first(), out.last());
    assert_eq!(out[0], control[0]);
}

#[test]
fn short_inputs_are_returned_unchanged() {
    let s = CurveSmoother::default();
    assert!(s.smooth(&[], false).is_empty());

    let two = pts(&[(1.0, 2.0), (3.0, 4.0)]);
    assert_eq!(s.smooth(&two, true), two);
}

#[test]
fn zero_density_is_clamped_to_one() {
    let s = CurveSmoother::new(0);
    assert_eq!(s.samples_per_segment(), 1);

    let control = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
    assert_eq!(s.smooth(&control, false), control);
}

#[test]
fn straight_line_stays_straight() {
    let control = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
    for p in CurveSmoother::new(5).smooth(&control, false) {
        assert!(p.y.abs() < 1e-12);
        assert!((-1e-12..=3.0 + 1e-12).contains(&p.x));
    }
}

#[test]
fn unsmoothed_polyline_is_closed_verbatim() {
    let plate = ControlPolyline {
        tag: "plate",
        role: PolylineRole::Detail,
        points: pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]),
        closed: true,
        smooth: false,
    };
    let out = CurveSmoother::default().smooth_polyline(&plate);

    assert_eq!(out.len(), 5);
    assert_eq!(&out[..4], plate.points.as_slice());
    assert_eq!(out[4], plate.points[0]);
}

#[test]
fn catmull_rom_endpoints_match_inner_points() {
    let (p0, p1, p2, p3) = (
        Point::new(-1.0, 3.0),
        Point::new(0.0, 0.0),
        Point::new(5.0, 2.0),
        Point::new(9.0, -4.0),
    );
    assert_eq!(catmull_rom(p0, p1, p2, p3, 0.0), p1);
    let end = catmull_rom(p0, p1, p2, p3, 1.0);
    assert!((end.x - p2.x).abs() < 1e-12 && (end.y - p2.y).abs() < 1e-12);
}
