//! Front symbol placement along arc length.
//!
//! Glyphs sit every `spacing` along the scene-space path, starting half a
//! spacing in. Each is oriented by the local tangent and pushed off the
//! line along the normal. Nothing here is persisted; callers regenerate
//! from scratch whenever the path or its transform changes.

use crate::geometry::path_length::Piece;
use crate::geometry::tolerance::EPS_POS;
use crate::model::{Color, GlyphKind, Vec2};
use crate::shapes::front::FrontLine;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Glyph {
    pub kind: GlyphKind,
    /// Point on the path the glyph is stamped at.
    pub foot: Vec2,
    /// Glyph centroid, offset from the path.
    pub center: Vec2,
    /// Tangent angle in degrees.
    pub angle: f32,
    pub size: f32,
    pub color: Color,
    /// +1 left of travel, -1 right.
    pub side: f32,
}

const SEMICIRCLE_STEPS: usize = 12;

impl Glyph {
    fn frame(&self) -> (Vec2, Vec2) {
        let (s, c) = self.angle.to_radians().sin_cos();
        let tangent = Vec2::new(c, s);
        (tangent, -tangent.perp() * self.side)
    }

    /// Closed outline in scene coordinates, base on the path.
    pub fn outline(&self) -> Vec<Vec2> {
        let (t, n) = self.frame();
        let half = 0.5 * self.size;
        match self.kind {
            GlyphKind::Triangle => vec![
                self.foot - t * half,
                self.foot + n * (self.size * 0.866),
                self.foot + t * half,
            ],
            GlyphKind::Semicircle => (0..=SEMICIRCLE_STEPS)
                .map(|k| {
                    let th = std::f32::consts::PI * k as f32 / SEMICIRCLE_STEPS as f32;
                    self.foot + t * (half * th.cos()) + n * (half * th.sin())
                })
                .collect(),
        }
    }
}

/// Perpendicular distance from the path to a glyph centroid. The base
/// term is the glyph's geometric centroid height; the second term grows
/// linearly toward the diagonals (45°, 135°, ...) and vanishes on the axes.
pub fn centroid_offset(kind: GlyphKind, angle_deg: f32, size: f32) -> f32 {
    let a = angle_deg.rem_euclid(90.0);
    let diag = 1.0 - (a - 45.0).abs() / 45.0;
    let base = match kind {
        GlyphKind::Triangle => 0.289,
        GlyphKind::Semicircle => 0.212,
    };
    size * (base + 0.08 * diag)
}

/// Stamp glyphs along `pieces` (scene coordinates) for a front style.
pub fn generate(pieces: &[Piece], front: &FrontLine) -> Vec<Glyph> {
    let spacing = front.spacing;
    if pieces.is_empty() || !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }
    let lengths: Vec<f32> = pieces.iter().map(Piece::length).collect();
    let total: f32 = lengths.iter().sum();
    let mut glyphs = Vec::new();
    let mut placed = 0usize;
    let mut last_center: Option<Vec2> = None;
    let mut piece = 0usize;
    let mut before = 0.0f32;
    let mut target = 0.5 * spacing;
    while target <= total + EPS_POS {
        while piece + 1 < pieces.len() && before + lengths[piece] < target {
            before += lengths[piece];
            piece += 1;
        }
        let at = pieces[piece].point_at_length(target - before);
        target += spacing;

        let (kind, color, side) = front.front_type.glyph_at(placed);
        let side = if front.reflect { -side } else { side };
        let angle = at.angle.to_degrees();
        let tangent = Vec2::new(at.angle.cos(), at.angle.sin());
        let normal = -tangent.perp() * side;
        let foot = Vec2::new(at.x, at.y);
        let center = foot + normal * centroid_offset(kind, angle, front.symbol_size);

        if let Some(prev) = last_center {
            if prev.dist(center) < 0.5 * spacing {
                continue;
            }
        }
        glyphs.push(Glyph {
            kind,
            foot,
            center,
            angle,
            size: front.symbol_size,
            color,
            side,
        });
        last_center = Some(center);
        placed += 1;
    }
    glyphs
}
