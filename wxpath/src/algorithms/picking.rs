use crate::geometry::math::{quad_distance_sq, seg_distance_sq};
use crate::geometry::path_length::Piece;
use crate::model::{ShapeState, Vec2};
use crate::shapes::Shape;
use crate::{Editor, Pick};

pub fn pick_impl(ed: &Editor, x: f32, y: f32, tol: f32) -> Option<Pick> {
    if !x.is_finite() || !y.is_finite() || !tol.is_finite() || tol < 0.0 {
        return None;
    }
    let p = Vec2::new(x, y);
    // Handles first; only the single shape in edit mode shows them.
    if let Some((id, handles)) = ed.visible_handles() {
        let r = tol.max(ed.config.handle_radius);
        let r2 = r * r;
        let mut best: Option<(usize, f32)> = None;
        for (i, h) in handles.iter().enumerate() {
            let d2 = (h.center.x - x).powi(2) + (h.center.y - y).powi(2);
            if d2 <= r2 && best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((i, d2));
            }
        }
        if let Some((index, d2)) = best {
            return Some(Pick::Handle { shape: id, index, dist: d2.sqrt() });
        }
    }
    // Shapes, topmost first.
    let tol2 = tol * tol;
    for &id in ed.order.iter().rev() {
        let shape = match ed.shape(id) {
            Some(s) => s,
            None => continue,
        };
        if let Some((segment, t, d2)) = nearest_on_shape(shape, p) {
            if d2 <= tol2 {
                return Some(Pick::Shape { id, segment, t, dist: d2.sqrt() });
            }
        }
    }
    None
}

/// Closest outline point of `shape`: (segment index, t, squared distance).
fn nearest_on_shape(shape: &Shape, p: Vec2) -> Option<(usize, f32, f32)> {
    if !shape.is_visible() || shape.state() == ShapeState::Drawing {
        return None;
    }
    let mut best: Option<(usize, f32, f32)> = None;
    for (i, piece) in shape.scene_pieces().iter().enumerate() {
        let (d2, t) = match piece {
            Piece::Line(a, b) => seg_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y),
            Piece::Quad(q) => quad_distance_sq(p, q),
        };
        if best.map_or(true, |(_, _, bd)| d2 < bd) {
            best = Some((i + 1, t, d2));
        }
    }
    best
}
