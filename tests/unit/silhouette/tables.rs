use super::*;

#[test]
fn built_in_tables_validate() {
    for v in Viewpoint::ALL {
        let t = table(v);
        assert_eq!(t.viewpoint, v);
        t.validate().unwrap();
    }
}

#[test]
fn anchor_fractions_stay_on_canvas() {
    for v in Viewpoint::ALL {
        let t = table(v);
        for (name, p) in t.anchors {
            let (fx, fy) = p.fractions(t.baseline);
            assert!((0.0..=1.0).contains(&fx), "{v}/{name} x={fx}");
            assert!((0.0..=1.0).contains(&fy), "{v}/{name} y={fy}");
        }
    }
}

#[test]
fn proportions_match_a_mid_size_sedan() {
    for v in [Viewpoint::SideDriver, Viewpoint::FrontLeft45] {
        let wheels = table(v).wheels;
        let wheelbase = wheels[1].center.x - wheels[0].center.x;
        assert!((0.57..=0.64 + 1e-9).contains(&wheelbase), "{v}: {wheelbase}");
    }
    for v in Viewpoint::ALL {
        for w in table(v).wheels {
            assert!((0.035..=0.045).contains(&w.ry), "{v}/{}: {}", w.name, w.ry);
            assert!(w.rx <= w.ry);
        }
    }
}

#[test]
fn roof_peak_sits_near_mid_width() {
    let t = table(Viewpoint::FrontLeft45);
    let (_, peak) = t
        .anchors
        .iter()
        .find(|(name, _)| *name == "roof_peak")
        .unwrap();
    assert!((peak.x - 0.5).abs() < 0.1);
}

#[test]
fn resolve_applies_baseline() {
    let canvas = Canvas::new(1000, 2000).unwrap();
    let p = fp(0.25, -0.02).resolve(canvas, BASELINE);
    assert!((p.x - 250.0).abs() < 1e-9);
    assert!((p.y - 1000.0).abs() < 1e-9);
}

static SHORT_CURVE: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::SideDriver,
    baseline: BASELINE,
    curves: &[CurveDef {
        tag: "stub",
        role: PolylineRole::Body,
        points: &[fp(0.5, 0.0)],
        closed: false,
        smooth: true,
    }],
    wheels: &[],
    anchors: &[],
    bbox: [fp(0.1, -0.1), fp(0.9, 0.1)],
    bleed: 0.0,
};

static DUPLICATE_ANCHOR: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::RearCenter,
    baseline: BASELINE,
    curves: &[],
    wheels: &[],
    anchors: &[("hub", fp(0.3, 0.0)), ("hub", fp(0.7, 0.0))],
    bbox: [fp(0.1, -0.1), fp(0.9, 0.1)],
    bleed: 0.0,
};

static OFF_CANVAS: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::FrontLeft45,
    baseline: BASELINE,
    curves: &[CurveDef {
        tag: "overhang",
        role: PolylineRole::Detail,
        points: &[fp(0.5, 0.0), fp(1.03, 0.0)],
        closed: false,
        smooth: false,
    }],
    wheels: &[],
    anchors: &[],
    bbox: [fp(0.1, -0.1), fp(0.9, 0.1)],
    bleed: 0.0,
};

static BLEEDING: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::FrontLeft45,
    baseline: BASELINE,
    curves: &[CurveDef {
        tag: "overhang",
        role: PolylineRole::Detail,
        points: &[fp(0.5, 0.0), fp(1.03, 0.0)],
        closed: false,
        smooth: false,
    }],
    wheels: &[],
    anchors: &[],
    bbox: [fp(0.1, -0.1), fp(0.9, 0.1)],
    bleed: 0.05,
};

static FLAT_WHEEL: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::SideDriver,
    baseline: BASELINE,
    curves: &[],
    wheels: &[WheelDef {
        name: "flat",
        center: fp(0.5, 0.1),
        rx: 0.04,
        ry: 0.0,
    }],
    anchors: &[],
    bbox: [fp(0.1, -0.1), fp(0.9, 0.1)],
    bleed: 0.0,
};

static INVERTED_BBOX: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::SideDriver,
    baseline: BASELINE,
    curves: &[],
    wheels: &[],
    anchors: &[],
    bbox: [fp(0.9, 0.1), fp(0.1, -0.1)],
    bleed: 0.0,
};

#[test]
fn malformed_tables_are_rejected() {
    for t in [
        &SHORT_CURVE,
        &DUPLICATE_ANCHOR,
        &OFF_CANVAS,
        &FLAT_WHEEL,
        &INVERTED_BBOX,
    ] {
        let err = t.validate().unwrap_err();
        assert!(matches!(err, GhostError::Validation(_)), "{err}");
    }
}

#[test]
fn bleed_widens_the_accepted_range() {
    BLEEDING.validate().unwrap();
}
