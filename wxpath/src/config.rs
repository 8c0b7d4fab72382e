use crate::error::PersistError;
use crate::geometry::tolerance::{CLOSE_TOL, INSERT_TOL, REMOVE_TOL};
use serde::{Deserialize, Serialize};

/// Editor tuning. Every field has a default so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub close_tolerance: f32,
    pub remove_tolerance: f32,
    /// Farthest a click may be from a chord and still insert a point.
    pub insert_tolerance: f32,
    pub handle_radius: f32,
    pub pick_tolerance: f32,
    pub front_spacing: f32,
    pub front_symbol_size: f32,
    /// Minimum pointer travel between freehand samples on drag tools.
    pub sample_distance: f32,
    pub history_capacity: usize,
    pub paste_offset: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            close_tolerance: CLOSE_TOL,
            remove_tolerance: REMOVE_TOL,
            insert_tolerance: INSERT_TOL,
            handle_radius: 6.0,
            pick_tolerance: 6.0,
            front_spacing: 30.0,
            front_symbol_size: 10.0,
            sample_distance: 8.0,
            history_capacity: 100,
            paste_offset: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<EditorConfig, PersistError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), PersistError> {
        let positive = [
            ("close_tolerance", self.close_tolerance),
            ("remove_tolerance", self.remove_tolerance),
            ("insert_tolerance", self.insert_tolerance),
            ("handle_radius", self.handle_radius),
            ("pick_tolerance", self.pick_tolerance),
            ("front_spacing", self.front_spacing),
            ("front_symbol_size", self.front_symbol_size),
        ];
        for (field, v) in positive {
            if !v.is_finite() {
                return Err(PersistError::NonFinite(field));
            }
            if v <= 0.0 {
                return Err(PersistError::InvalidField {
                    field,
                    reason: format!("{} must be positive", v),
                });
            }
        }
        for (field, v) in [("sample_distance", self.sample_distance), ("paste_offset", self.paste_offset)] {
            if !v.is_finite() {
                return Err(PersistError::NonFinite(field));
            }
            if v < 0.0 {
                return Err(PersistError::InvalidField {
                    field,
                    reason: format!("{} must not be negative", v),
                });
            }
        }
        if self.history_capacity == 0 {
            return Err(PersistError::InvalidField {
                field: "history_capacity",
                reason: "must hold at least one snapshot".into(),
            });
        }
        Ok(())
    }
}
