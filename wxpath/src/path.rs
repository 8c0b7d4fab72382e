//! Path model: one shape's outline as an ordered list of drawing commands.
//!
//! Coordinates are in the shape's local path frame. The shape renders a
//! path point `p` at `M · (p − path_offset)`, so `recompute_dimensions`
//! must run after every mutation before the next render or hit test.

use crate::geometry::math::dist_point_to_seg_sq;
use crate::geometry::path_length::{pieces_of, Piece};
use crate::model::{Segment, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    path_offset: Vec2,
}

impl Path {
    /// A fresh path holding only its starting `MoveTo`.
    pub fn new(start: Vec2) -> Self {
        let mut p = Path {
            segments: vec![Segment::MoveTo(start)],
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            path_offset: Vec2::ZERO,
        };
        p.recompute_dimensions();
        p
    }

    /// Build from raw segments. The first must be `MoveTo` and no later
    /// segment may be.
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if !matches!(segments.first(), Some(Segment::MoveTo(_))) {
            return None;
        }
        if segments[1..].iter().any(|s| matches!(s, Segment::MoveTo(_))) {
            return None;
        }
        let mut p = Path {
            segments,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            path_offset: Vec2::ZERO,
        };
        p.recompute_dimensions();
        Some(p)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Fewer than two segments never makes it into a committed shape.
    pub fn is_degenerate(&self) -> bool {
        self.segments.len() < 2
    }

    pub fn anchor(&self, i: usize) -> Option<Vec2> {
        self.segments.get(i).map(Segment::anchor)
    }

    pub fn anchors(&self) -> Vec<Vec2> {
        self.segments.iter().map(Segment::anchor).collect()
    }

    pub fn pieces(&self) -> Vec<Piece> {
        pieces_of(&self.segments)
    }

    /// (left, top, width, height) of the bounding box in the path frame.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.width, self.height)
    }

    /// Center of the bounding box; the local origin the shape renders around.
    pub fn path_offset(&self) -> Vec2 {
        self.path_offset
    }

    /// First and last anchor coincide within `tol` on a path of three or
    /// more anchors.
    pub fn is_closed(&self, tol: f32) -> bool {
        let n = self.segments.len();
        if n < 3 {
            return false;
        }
        self.segments[0].anchor().dist(self.segments[n - 1].anchor()) <= tol
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub(crate) fn push_line(&mut self, p: Vec2) {
        self.segments.push(Segment::LineTo(p));
    }

    pub(crate) fn set_last_anchor(&mut self, p: Vec2) {
        if let Some(last) = self.segments.last_mut() {
            *last.anchor_mut() = p;
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Segment> {
        if self.segments.len() > 1 {
            self.segments.pop()
        } else {
            None
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.segments.truncate(len.max(1));
    }

    /// Replace each `LineTo` with a `QuadTo` whose control point is the
    /// straight-line midpoint. Returns whether anything changed.
    pub fn convert_straight_to_curve(&mut self) -> bool {
        if self.segments.len() < 2 {
            return false;
        }
        let mut changed = false;
        for i in 1..self.segments.len() {
            if let Segment::LineTo(to) = self.segments[i] {
                let from = self.segments[i - 1].anchor();
                self.segments[i] = Segment::QuadTo { ctrl: from.midpoint(to), to };
                changed = true;
            }
        }
        if changed {
            self.recompute_dimensions();
        }
        changed
    }

    /// Segment index and squared distance of the chord (anchor to anchor)
    /// closest to `p`.
    pub fn nearest_chord(&self, p: Vec2) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for i in 1..self.segments.len() {
            let a = self.segments[i - 1].anchor();
            let b = self.segments[i].anchor();
            let d2 = dist_point_to_seg_sq(p, a, b);
            if best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((i, d2));
            }
        }
        best
    }

    /// Split segment `i` into two curved segments meeting at `p`.
    pub fn split_chord(&mut self, i: usize, p: Vec2) -> bool {
        if i == 0 || i >= self.segments.len() || !p.is_finite() {
            return false;
        }
        let a = self.segments[i - 1].anchor();
        let b = self.segments[i].anchor();
        self.segments[i] = Segment::QuadTo { ctrl: a.midpoint(p), to: p };
        self.segments.insert(i + 1, Segment::QuadTo { ctrl: p.midpoint(b), to: b });
        self.recompute_dimensions();
        true
    }

    /// Split the segment whose chord lies closest to `p` into two curved
    /// segments meeting at `p`, if that chord is within `tol`. Returns the
    /// index of the new anchor.
    pub fn insert_point(&mut self, p: Vec2, tol: f32) -> Option<usize> {
        if self.segments.len() < 2 || !p.is_finite() {
            return None;
        }
        let (i, d2) = self.nearest_chord(p)?;
        if d2 > tol * tol {
            return None;
        }
        self.split_chord(i, p).then_some(i)
    }

    /// Index of the anchor nearest to `p` within `tol`.
    pub fn closest_anchor(&self, p: Vec2, tol: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, s) in self.segments.iter().enumerate() {
            let d = s.anchor().dist(p);
            if d <= tol && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Remove the anchor nearest to `p` (within `tol`). See `remove_anchor`.
    pub fn remove_point(&mut self, p: Vec2, tol: f32, close_tol: f32) -> Option<usize> {
        let idx = self.closest_anchor(p, tol)?;
        if self.remove_anchor(idx, close_tol) {
            Some(idx)
        } else {
            None
        }
    }

    /// Remove anchor `idx`, joining its neighbours with one curved segment
    /// whose control point is their straight-line midpoint.
    ///
    /// On a closed path the first and last anchors are the same point:
    /// removing either drops that corner and re-closes the path on the
    /// following anchor. A no-op (returns false) when the result would fall
    /// below two segments or, for closed paths, below three distinct corners.
    pub fn remove_anchor(&mut self, idx: usize, close_tol: f32) -> bool {
        let n = self.segments.len();
        if idx >= n {
            return false;
        }
        if self.is_closed(close_tol) {
            // n segments close over n - 1 corners
            if n <= 4 {
                return false;
            }
            if idx == 0 || idx == n - 1 {
                let new_start = self.segments[1].anchor();
                let before_close = self.segments[n - 2].anchor();
                let mut segs = Vec::with_capacity(n - 1);
                segs.push(Segment::MoveTo(new_start));
                segs.extend_from_slice(&self.segments[2..n - 1]);
                segs.push(Segment::QuadTo {
                    ctrl: before_close.midpoint(new_start),
                    to: new_start,
                });
                self.segments = segs;
                self.recompute_dimensions();
                return true;
            }
        }
        if n <= 2 {
            return false;
        }
        if idx == 0 {
            let next = self.segments[1].anchor();
            self.segments[1] = Segment::MoveTo(next);
            self.segments.remove(0);
        } else if idx == n - 1 {
            self.segments.pop();
        } else {
            let prev = self.segments[idx - 1].anchor();
            let next = self.segments[idx + 1].anchor();
            self.segments[idx + 1] = Segment::QuadTo { ctrl: prev.midpoint(next), to: next };
            self.segments.remove(idx);
        }
        self.recompute_dimensions();
        true
    }

    /// Scan anchors and curve extrema for the bounding box, and place the
    /// path offset at its center.
    pub fn recompute_dimensions(&mut self) {
        let mut minx = f32::INFINITY;
        let mut miny = f32::INFINITY;
        let mut maxx = f32::NEG_INFINITY;
        let mut maxy = f32::NEG_INFINITY;
        let mut grow = |p: Vec2| {
            minx = minx.min(p.x);
            miny = miny.min(p.y);
            maxx = maxx.max(p.x);
            maxy = maxy.max(p.y);
        };
        for s in &self.segments {
            grow(s.anchor());
        }
        for piece in pieces_of(&self.segments) {
            if let Piece::Quad(q) = piece {
                for t in q.extrema() {
                    grow(q.eval(t));
                }
            }
        }
        if !minx.is_finite() || !miny.is_finite() || !maxx.is_finite() || !maxy.is_finite() {
            return;
        }
        self.left = minx;
        self.top = miny;
        self.width = maxx - minx;
        self.height = maxy - miny;
        self.path_offset = Vec2::new(minx + 0.5 * self.width, miny + 0.5 * self.height);
    }

    /// Rewrite every coordinate scaled about the current path offset. The
    /// offset itself is a fixed point, so the rendered origin stays put.
    pub fn bake_scale(&mut self, sx: f32, sy: f32) {
        let o = self.path_offset;
        for s in self.segments.iter_mut() {
            *s = s.map(|p| Vec2::new(o.x + (p.x - o.x) * sx, o.y + (p.y - o.y) * sy));
        }
        self.recompute_dimensions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(points: &[(f32, f32)]) -> Path {
        let mut segs = vec![Segment::MoveTo(Vec2::new(points[0].0, points[0].1))];
        for &(x, y) in &points[1..] {
            segs.push(Segment::LineTo(Vec2::new(x, y)));
        }
        Path::from_segments(segs).unwrap()
    }

    #[test]
    fn rejects_missing_move_to() {
        assert!(Path::from_segments(vec![Segment::LineTo(Vec2::ZERO)]).is_none());
        assert!(Path::from_segments(vec![]).is_none());
    }

    #[test]
    fn convert_is_idempotent() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]);
        assert!(p.convert_straight_to_curve());
        let once = p.clone();
        assert!(!p.convert_straight_to_curve());
        assert_eq!(p, once);
        assert_eq!(p.segments()[1].control(), Some(Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn dimensions_track_bounds_and_offset() {
        let p = straight(&[(10.0, 20.0), (110.0, 20.0), (110.0, 70.0)]);
        assert_eq!(p.bounds(), (10.0, 20.0, 100.0, 50.0));
        assert_eq!(p.path_offset(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn insert_splits_nearest_chord() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        let idx = p.insert_point(Vec2::new(102.0, 40.0), 5.0).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(p.len(), 4);
        assert_eq!(p.anchor(2), Some(Vec2::new(102.0, 40.0)));
        assert_eq!(p.anchor(3), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn insert_ignores_far_points() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(p.insert_point(Vec2::new(50.0, 900.0), 10.0), None);
        assert_eq!(p.len(), 2);
        assert_eq!(p.insert_point(Vec2::new(50.0, 8.0), 10.0), Some(1));
    }

    #[test]
    fn closed_triangle_keeps_its_corners() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 0.0)]);
        assert!(p.is_closed(10.0));
        for i in 0..4 {
            assert!(!p.remove_anchor(i, 10.0));
        }
        assert_eq!(p.len(), 4);

        let mut q = straight(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)]);
        assert!(q.remove_anchor(0, 10.0));
        assert_eq!(q.anchors(), vec![
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 0.0),
        ]);
        assert!(q.is_closed(10.0));
    }

    #[test]
    fn remove_interior_relinks_neighbours() {
        let mut p = straight(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);
        assert_eq!(p.remove_point(Vec2::new(52.0, 49.0), 5.0, 10.0), Some(1));
        assert_eq!(p.len(), 2);
        assert_eq!(
            p.segments()[1],
            Segment::QuadTo { ctrl: Vec2::new(50.0, 0.0), to: Vec2::new(100.0, 0.0) }
        );
    }

    #[test]
    fn remove_respects_tolerance_and_minimum() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0)]);
        assert_eq!(p.remove_point(Vec2::new(0.0, 0.0), 5.0, 10.0), None);
        let mut q = straight(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]);
        assert_eq!(q.remove_point(Vec2::new(50.0, 20.0), 5.0, 10.0), None);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn bake_scale_keeps_offset_fixed() {
        let mut p = straight(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]);
        let o = p.path_offset();
        p.bake_scale(2.0, 0.5);
        assert_eq!(p.path_offset(), o);
        assert_eq!(p.bounds().2, 200.0);
        assert_eq!(p.bounds().3, 25.0);
    }
}
