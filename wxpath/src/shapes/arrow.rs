//! Arrow shape: a path with optional heads at either end.

use super::ShapeVariant;
use crate::error::PersistError;
use crate::geometry::path_length::Piece;
use crate::model::{ArrowHeadStyle, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heads never shrink below this, so thin strokes still show one.
pub const MIN_HEAD_SIZE: f32 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowHeads {
    #[serde(rename = "startArrowHeadStyle", default)]
    pub start: ArrowHeadStyle,
    #[serde(rename = "endArrowHeadStyle", default = "default_end")]
    pub end: ArrowHeadStyle,
}

fn default_end() -> ArrowHeadStyle {
    ArrowHeadStyle::FilledHead
}

impl Default for ArrowHeads {
    fn default() -> Self {
        ArrowHeads {
            start: ArrowHeadStyle::NoHead,
            end: default_end(),
        }
    }
}

/// Derived head triangle in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ArrowHead {
    pub style: ArrowHeadStyle,
    pub tip: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

impl ArrowHead {
    /// Outline points, tip in the middle. Filled heads close the triangle.
    pub fn outline(&self) -> (Vec<Vec2>, bool) {
        (
            vec![self.left, self.tip, self.right],
            self.style == ArrowHeadStyle::FilledHead,
        )
    }

    /// Unit direction the head points in.
    pub fn direction(&self) -> Option<Vec2> {
        (self.tip - self.left.midpoint(self.right)).normalized()
    }
}

pub fn head_size(stroke_width: f32) -> f32 {
    (stroke_width * 3.0).max(MIN_HEAD_SIZE)
}

fn head(style: ArrowHeadStyle, tip: Vec2, dir: Vec2, size: f32) -> ArrowHead {
    let base = tip - dir * size;
    let half = dir.perp() * (0.5 * size);
    ArrowHead {
        style,
        tip,
        left: base - half,
        right: base + half,
    }
}

/// Head geometry from the first and last piece tangents.
pub fn build_heads(pieces: &[Piece], heads: &ArrowHeads, stroke_width: f32) -> Vec<ArrowHead> {
    let mut out = Vec::with_capacity(2);
    let size = head_size(stroke_width);
    if heads.start != ArrowHeadStyle::NoHead {
        if let Some(first) = pieces.first() {
            if let Some(d) = first.start_direction() {
                out.push(head(heads.start, first.start(), -d, size));
            }
        }
    }
    if heads.end != ArrowHeadStyle::NoHead {
        if let Some(last) = pieces.last() {
            if let Some(d) = last.end_direction() {
                out.push(head(heads.end, last.end(), d, size));
            }
        }
    }
    out
}

impl ShapeVariant for ArrowHeads {
    const TYPE: &'static str = "arrow";

    fn write_fields(&self, obj: &mut Map<String, Value>) {
        super::merge_fields(self, obj);
    }

    fn read_fields(obj: &Map<String, Value>) -> Result<Self, PersistError> {
        super::fields_from(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_has_floor() {
        assert_eq!(head_size(1.0), 25.0);
        assert_eq!(head_size(10.0), 30.0);
    }

    #[test]
    fn end_head_points_along_last_tangent() {
        let pieces = [Piece::Line(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))];
        let heads = build_heads(&pieces, &ArrowHeads::default(), 2.0);
        assert_eq!(heads.len(), 1);
        let h = heads[0];
        assert_eq!(h.tip, Vec2::new(100.0, 0.0));
        let d = h.direction().unwrap();
        assert!((d.x - 1.0).abs() < 1e-5 && d.y.abs() < 1e-5);
        assert!((h.left.x - 75.0).abs() < 1e-4);
    }

    #[test]
    fn start_head_points_backwards() {
        let pieces = [Piece::Line(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))];
        let styles = ArrowHeads {
            start: ArrowHeadStyle::OpenHead,
            end: ArrowHeadStyle::NoHead,
        };
        let heads = build_heads(&pieces, &styles, 2.0);
        assert_eq!(heads.len(), 1);
        let d = heads[0].direction().unwrap();
        assert!((d.x + 1.0).abs() < 1e-5);
        assert!(!heads[0].outline().1);
    }
}
