//! Weather front line: path plus periodic symbol glyphs.

use super::ShapeVariant;
use crate::error::PersistError;
use crate::geometry::limits;
use crate::model::{Color, FrontType, GlyphKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SPACING: f32 = 30.0;
pub const DEFAULT_SYMBOL_SIZE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontLine {
    pub front_type: FrontType,
    pub spacing: f32,
    pub symbol_size: f32,
    pub reflect: bool,
}

impl Default for FrontLine {
    fn default() -> Self {
        FrontLine {
            front_type: FrontType::Warm,
            spacing: DEFAULT_SPACING,
            symbol_size: DEFAULT_SYMBOL_SIZE,
            reflect: false,
        }
    }
}

impl FrontType {
    pub fn stroke_color(&self) -> Color {
        match self {
            FrontType::Warm => Color::RED,
            FrontType::Cold | FrontType::Stationary => Color::BLUE,
            FrontType::Occluded => Color::PURPLE,
        }
    }

    /// Glyph kind, color and side for the nth placement along the line.
    /// Side +1 is left of the direction of travel.
    pub fn glyph_at(&self, n: usize) -> (GlyphKind, Color, f32) {
        let even = n % 2 == 0;
        match self {
            FrontType::Warm => (GlyphKind::Semicircle, Color::RED, 1.0),
            FrontType::Cold => (GlyphKind::Triangle, Color::BLUE, 1.0),
            FrontType::Stationary if even => (GlyphKind::Triangle, Color::BLUE, 1.0),
            FrontType::Stationary => (GlyphKind::Semicircle, Color::RED, -1.0),
            FrontType::Occluded if even => (GlyphKind::Triangle, Color::PURPLE, 1.0),
            FrontType::Occluded => (GlyphKind::Semicircle, Color::PURPLE, 1.0),
        }
    }
}

impl ShapeVariant for FrontLine {
    const TYPE: &'static str = "weatherFrontLine";

    fn write_fields(&self, obj: &mut Map<String, Value>) {
        super::merge_fields(self, obj);
    }

    fn read_fields(obj: &Map<String, Value>) -> Result<Self, PersistError> {
        let f: FrontLine = super::fields_from(obj)?;
        if !f.spacing.is_finite() || f.spacing <= 0.0 || f.spacing > limits::SPACING_MAX {
            return Err(PersistError::InvalidField {
                field: "spacing",
                reason: format!("{} is not in (0, {}]", f.spacing, limits::SPACING_MAX),
            });
        }
        if !limits::in_width_bounds(f.symbol_size) {
            return Err(PersistError::InvalidField {
                field: "symbolSize",
                reason: format!("{} is not a usable size", f.symbol_size),
            });
        }
        Ok(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stationary_alternates_sides_and_colors() {
        let t = FrontType::Stationary;
        let (k0, c0, s0) = t.glyph_at(0);
        let (k1, c1, s1) = t.glyph_at(1);
        assert_eq!((k0, c0), (GlyphKind::Triangle, Color::BLUE));
        assert_eq!((k1, c1), (GlyphKind::Semicircle, Color::RED));
        assert_eq!(s0, -s1);
    }

    #[test]
    fn rejects_zero_spacing() {
        let mut m = Map::new();
        m.insert("spacing".into(), Value::from(0.0));
        assert!(matches!(
            FrontLine::read_fields(&m),
            Err(PersistError::InvalidField { field: "spacing", .. })
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let m = Map::new();
        assert_eq!(FrontLine::read_fields(&m).unwrap(), FrontLine::default());
    }
}
