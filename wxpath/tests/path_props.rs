use proptest::prelude::*;
use wxpath::geometry::quad::QuadBezier;
use wxpath::model::{Segment, Tool, Vec2};
use wxpath::path::Path;
use wxpath::Editor;

fn pt() -> impl Strategy<Value = Vec2> {
    (-400i16..400, -400i16..400).prop_map(|(x, y)| Vec2::new(x as f32, y as f32))
}

/// Polyline anchors at least 2px apart with open ends well separated.
fn open_anchors(min: usize, max: usize) -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec(pt(), min..max).prop_filter("distinct, open", |pts| {
        pts.windows(2).all(|w| w[0].dist(w[1]) > 2.0) && pts[0].dist(pts[pts.len() - 1]) > 20.0
    })
}

fn straight(pts: &[Vec2]) -> Path {
    let mut segs = vec![Segment::MoveTo(pts[0])];
    segs.extend(pts[1..].iter().map(|p| Segment::LineTo(*p)));
    Path::from_segments(segs).unwrap()
}

/// A committed front line through `pts`, placed via click gestures.
fn drawn(ed: &mut Editor, pts: &[Vec2]) -> u32 {
    let id = ed.begin_draw(Tool::WeatherFront, pts[0].x, pts[0].y).unwrap();
    for p in &pts[1..] {
        ed.draw_pointer_down(p.x, p.y);
    }
    assert_eq!(ed.finish_drawing(), Some(id));
    id
}

fn close(a: Vec2, b: Vec2, tol: f32) -> bool {
    a.dist(b) <= tol
}

/// Composite Simpson reference in f64.
fn reference_length(q: &QuadBezier) -> f64 {
    let (p0, p1, p2) = (q.p0, q.p1, q.p2);
    let speed = |t: f64| {
        let dx = 2.0 * (1.0 - t) * (p1.x - p0.x) as f64 + 2.0 * t * (p2.x - p1.x) as f64;
        let dy = 2.0 * (1.0 - t) * (p1.y - p0.y) as f64 + 2.0 * t * (p2.y - p1.y) as f64;
        (dx * dx + dy * dy).sqrt()
    };
    let n = 20_000;
    let h = 1.0 / n as f64;
    let mut s = speed(0.0) + speed(1.0);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        s += w * speed(i as f64 * h);
    }
    s * h / 3.0
}

proptest! {
    #[test]
    fn convert_keeps_straight_midpoint(a in pt(), b in pt()) {
        prop_assume!(a.dist(b) > 1.0);
        let mut p = straight(&[a, b]);
        prop_assert!(p.convert_straight_to_curve());
        let q = match p.segments()[1] {
            Segment::QuadTo { ctrl, to } => QuadBezier::new(a, ctrl, to),
            _ => unreachable!(),
        };
        prop_assert!(close(q.eval(0.5), a.midpoint(b), 1e-3));
    }

    #[test]
    fn convert_is_idempotent(pts in open_anchors(2, 8)) {
        let mut p = straight(&pts);
        p.convert_straight_to_curve();
        let once = p.clone();
        prop_assert!(!p.convert_straight_to_curve());
        prop_assert_eq!(p, once);
    }

    #[test]
    fn insertion_keeps_existing_anchors(
        pts in open_anchors(2, 7),
        chord in any::<prop::sample::Index>(),
        t in 0.05f32..0.95,
        off in -5.0f32..5.0,
        angle in 0.0f32..360.0,
        dx in -50.0f32..50.0,
    ) {
        let mut ed = Editor::new();
        let id = drawn(&mut ed, &pts);
        ed.rotate_shape(id, angle);
        ed.translate_shape(id, dx, -dx);
        let before = ed.shape(id).unwrap().scene_anchors();
        let i = 1 + chord.index(before.len() - 1);
        let (a, b) = (before[i - 1], before[i]);
        let normal = (b - a).perp().normalized().unwrap_or(Vec2::ZERO);
        let at = a.lerp(b, t) + normal * off;
        let idx = ed.add_point(id, at.x, at.y).unwrap();
        let mut after = ed.shape(id).unwrap().scene_anchors();
        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert!(close(after[idx], at, 1e-2));
        after.remove(idx);
        for (a, b) in before.iter().zip(after.iter()) {
            prop_assert!(close(*a, *b, 1e-2), "{:?} moved to {:?}", a, b);
        }
    }

    #[test]
    fn removal_drops_exactly_one_anchor(pts in open_anchors(3, 8), pick in any::<prop::sample::Index>()) {
        let mut ed = Editor::new();
        let id = drawn(&mut ed, &pts);
        let anchors = ed.shape(id).unwrap().scene_anchors();
        let target = anchors[pick.index(anchors.len())];
        prop_assert!(ed.remove_point(id, target.x, target.y).is_some());
        prop_assert_eq!(ed.shape(id).unwrap().path().len(), anchors.len() - 1);
    }

    #[test]
    fn two_anchor_removal_is_noop(pts in open_anchors(2, 3)) {
        let mut ed = Editor::new();
        let id = drawn(&mut ed, &pts);
        prop_assert!(ed.remove_point(id, pts[0].x, pts[0].y).is_none());
        prop_assert_eq!(ed.shape(id).unwrap().path().len(), 2);
    }

    #[test]
    fn arc_length_is_monotone_and_accurate(a in pt(), c in pt(), b in pt()) {
        let q = QuadBezier::new(a, c, b);
        let reference = reference_length(&q);
        prop_assume!(reference > 1.0);
        // Accumulating panel by panel never decreases.
        let mut acc = 0.0f32;
        for i in 0..100 {
            let t0 = i as f32 / 100.0;
            let piece = q.arc_length_between(t0, t0 + 0.01);
            prop_assert!(piece >= 0.0);
            acc += piece;
        }
        let slack = 0.005 * reference as f32;
        let mut prev = 0.0f32;
        for i in 0..=64 {
            let l = q.arc_length_to(i as f32 / 64.0);
            prop_assert!(l + slack >= prev, "length fell from {} to {}", prev, l);
            prev = l;
        }
        for total in [q.arc_length() as f64, acc as f64] {
            let err = (total - reference).abs() / reference;
            prop_assert!(err < 0.01, "relative error {} (ref {})", err, reference);
        }
    }
}
