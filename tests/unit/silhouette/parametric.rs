use super::*;
use crate::foundation::core::Point;
use crate::geometry::curve::CurveSmoother;

fn reference() -> Canvas {
    Canvas::REFERENCE
}

#[test]
fn side_front_wheel_lands_on_golden_fraction() {
    let canvas = reference();
    let g = ParametricSilhouetteModel::new()
        .geometry(Viewpoint::SideDriver, canvas)
        .unwrap();
    let [fx, fy] = canvas.normalize(g.anchors["front_wheel"]);
    assert!((fx - 0.18).abs() <= 0.01, "x={fx}");
    assert!((fy - 0.62).abs() <= 0.01, "y={fy}");
}

#[test]
fn geometry_is_deterministic() {
    let model = ParametricSilhouetteModel::new();
    for v in Viewpoint::ALL {
        let a = model.geometry(v, reference()).unwrap();
        let b = model.geometry(v, reference()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn polylines_are_partitioned_by_role() {
    let g = ParametricSilhouetteModel::new()
        .geometry(Viewpoint::SideDriver, reference())
        .unwrap();
    assert_eq!(g.outlines.len(), 2);
    assert_eq!(g.windows.len(), 2);
    assert_eq!(g.details.len(), 3);
    assert!(g.outlines.iter().all(|p| p.role == PolylineRole::Body));
    assert!(g.windows.iter().all(|p| p.role == PolylineRole::Window));
    assert!(g.details.iter().all(|p| p.role == PolylineRole::Detail));
    assert_eq!(g.wheels.len(), 2);
}

#[test]
fn smoothed_geometry_stays_inside_padded_bbox() {
    let canvas = reference();
    let smoother = CurveSmoother::default();
    let model = ParametricSilhouetteModel::new();
    for v in Viewpoint::ALL {
        let g = model.geometry(v, canvas).unwrap();
        let frame = g.bbox.expand(12.0);
        for poly in g.polylines() {
            for p in smoother.smooth_polyline(poly) {
                assert!(frame.contains(p), "{v}/{}: {p:?} outside {frame:?}", poly.tag);
            }
        }
        for wheel in &g.wheels {
            for p in wheel.bounds().corners() {
                assert!(frame.contains(p), "{v}: wheel extreme {p:?} outside {frame:?}");
            }
        }
    }
}

#[test]
fn anchors_are_normalized_into_unit_square() {
    let canvas = Canvas::new(216, 384).unwrap();
    let model = ParametricSilhouetteModel::new();
    for v in Viewpoint::ALL {
        let g = model.geometry(v, canvas).unwrap();
        assert!(!g.anchors.is_empty());
        for (name, p) in &g.anchors {
            let [fx, fy] = canvas.normalize(*p);
            assert!((0.0..=1.0).contains(&fx) && (0.0..=1.0).contains(&fy), "{v}/{name}");
        }
    }
}

#[test]
fn three_quarter_view_carries_roof_peak() {
    let g = ParametricSilhouetteModel::new()
        .geometry(Viewpoint::FrontLeft45, reference())
        .unwrap();
    assert!(g.anchors.contains_key("roof_peak"));
    assert!(g.details.iter().any(|d| d.tag == "grille" && d.closed && !d.smooth));
}

#[test]
fn rear_wheels_are_foreshortened() {
    let g = ParametricSilhouetteModel::new()
        .geometry(Viewpoint::RearCenter, reference())
        .unwrap();
    for w in &g.wheels {
        assert!(w.rx < w.ry);
    }
    let left = g.anchors["left_wheel"];
    let right = g.anchors["right_wheel"];
    assert!((left.y - right.y).abs() < 1e-9);
    assert!((left.x + right.x - 1080.0).abs() < 1e-6);
}

#[test]
fn provider_returns_vector_silhouettes() {
    let model = ParametricSilhouetteModel::new();
    assert_eq!(model.name(), "parametric");
    match model.silhouette(Viewpoint::RearCenter, reference()).unwrap() {
        Silhouette::Vector(g) => {
            assert_eq!(g.viewpoint, Viewpoint::RearCenter);
            assert!(g.bbox.contains(Point::new(540.0, 998.4)));
        }
        Silhouette::Raster(_) => panic!("parametric model produced a raster"),
    }
}
