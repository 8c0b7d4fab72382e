//! Path length calculation and point sampling along drawn segments.
//!
//! A `Piece` is one drawn segment with its start anchor resolved, so it can
//! be measured, mapped through a transform and sampled by arc length.

use super::affine::Affine;
use super::quad::QuadBezier;
use crate::model::{Segment, Vec2};

/// A sampled point on a path with position and tangent angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Tangent angle in radians
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Piece {
    Line(Vec2, Vec2),
    Quad(QuadBezier),
}

impl Piece {
    pub fn start(&self) -> Vec2 {
        match self {
            Piece::Line(a, _) => *a,
            Piece::Quad(q) => q.p0,
        }
    }

    pub fn end(&self) -> Vec2 {
        match self {
            Piece::Line(_, b) => *b,
            Piece::Quad(q) => q.p2,
        }
    }

    pub fn length(&self) -> f32 {
        match self {
            Piece::Line(a, b) => a.dist(*b),
            Piece::Quad(q) => q.arc_length(),
        }
    }

    /// Unit direction of travel at the start, if the piece has any extent.
    pub fn start_direction(&self) -> Option<Vec2> {
        match self {
            Piece::Line(a, b) => (*b - *a).normalized(),
            Piece::Quad(q) => q.derivative(0.0).normalized().or_else(|| (q.p2 - q.p0).normalized()),
        }
    }

    /// Unit direction of travel at the end.
    pub fn end_direction(&self) -> Option<Vec2> {
        match self {
            Piece::Line(a, b) => (*b - *a).normalized(),
            Piece::Quad(q) => q.derivative(1.0).normalized().or_else(|| (q.p2 - q.p0).normalized()),
        }
    }

    /// Point and tangent at a distance along this piece (clamped to its ends).
    pub fn point_at_length(&self, s: f32) -> PathPoint {
        match self {
            Piece::Line(a, b) => {
                let len = a.dist(*b);
                let t = if len > 0.0 { (s / len).clamp(0.0, 1.0) } else { 0.0 };
                let p = a.lerp(*b, t);
                PathPoint { x: p.x, y: p.y, angle: (b.y - a.y).atan2(b.x - a.x) }
            }
            Piece::Quad(q) => {
                let t = q.parameter_at_arc_length(s);
                let p = q.eval(t);
                PathPoint { x: p.x, y: p.y, angle: q.tangent_angle(t) }
            }
        }
    }

    /// Map through an affine transform. Affine maps keep quadratics quadratic.
    pub fn transformed(&self, m: &Affine) -> Piece {
        match self {
            Piece::Line(a, b) => Piece::Line(m.apply(*a), m.apply(*b)),
            Piece::Quad(q) => Piece::Quad(QuadBezier::new(m.apply(q.p0), m.apply(q.p1), m.apply(q.p2))),
        }
    }
}

/// Resolve a segment list into drawn pieces. `MoveTo` contributes no piece.
pub fn pieces_of(segments: &[Segment]) -> Vec<Piece> {
    let mut out = Vec::with_capacity(segments.len().saturating_sub(1));
    let mut cur = match segments.first() {
        Some(s) => s.anchor(),
        None => return out,
    };
    for seg in &segments[1..] {
        match *seg {
            Segment::MoveTo(p) => {
                cur = p;
                continue;
            }
            Segment::LineTo(p) => out.push(Piece::Line(cur, p)),
            Segment::QuadTo { ctrl, to } => out.push(Piece::Quad(QuadBezier::new(cur, ctrl, to))),
        }
        cur = seg.anchor();
    }
    out
}

/// Calculate the total length of a run of pieces.
pub fn total_length(pieces: &[Piece]) -> f32 {
    pieces.iter().map(Piece::length).sum()
}

/// Get a point at a specific distance along a run of pieces.
/// Distances past the end return the final point.
pub fn point_on_pieces(pieces: &[Piece], distance: f32) -> Option<PathPoint> {
    let mut remaining = distance.max(0.0);
    for piece in pieces {
        let len = piece.length();
        if remaining <= len {
            return Some(piece.point_at_length(remaining));
        }
        remaining -= len;
    }
    pieces.last().map(|p| p.point_at_length(p.length()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs() -> Vec<Segment> {
        vec![
            Segment::MoveTo(Vec2::new(0.0, 0.0)),
            Segment::LineTo(Vec2::new(10.0, 0.0)),
            Segment::LineTo(Vec2::new(10.0, 10.0)),
        ]
    }

    #[test]
    fn test_path_length() {
        let pieces = pieces_of(&segs());
        assert_eq!(pieces.len(), 2);
        assert!((total_length(&pieces) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_point_on_path() {
        let pieces = pieces_of(&segs());
        let p1 = point_on_pieces(&pieces, 5.0).unwrap();
        assert!((p1.x - 5.0).abs() < 0.001);
        assert!((p1.y - 0.0).abs() < 0.001);
        let p2 = point_on_pieces(&pieces, 15.0).unwrap();
        assert!((p2.x - 10.0).abs() < 0.001);
        assert!((p2.y - 5.0).abs() < 0.001);
        assert!((p2.angle - std::f32::consts::FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_transformed_line_keeps_length_under_rotation() {
        let pieces = pieces_of(&segs());
        let m = Affine::rotate_deg(37.0);
        let moved: Vec<Piece> = pieces.iter().map(|p| p.transformed(&m)).collect();
        assert!((total_length(&moved) - 20.0).abs() < 0.001);
    }
}
