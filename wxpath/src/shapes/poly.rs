//! Curve-only variants: no derived geometry, just edit affordances.

use super::ShapeVariant;
use crate::error::PersistError;
use serde_json::{Map, Value};

/// Open curve without arrowheads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurvedLine;

/// Free polyline/curve; may close onto its start anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolyPath;

impl ShapeVariant for CurvedLine {
    const TYPE: &'static str = "curvedLine";

    fn write_fields(&self, _obj: &mut Map<String, Value>) {}

    fn read_fields(_obj: &Map<String, Value>) -> Result<Self, PersistError> {
        Ok(CurvedLine)
    }
}

impl ShapeVariant for PolyPath {
    const TYPE: &'static str = "polyPath";

    fn write_fields(&self, _obj: &mut Map<String, Value>) {}

    fn read_fields(_obj: &Map<String, Value>) -> Result<Self, PersistError> {
        Ok(PolyPath)
    }
}
