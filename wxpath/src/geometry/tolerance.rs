// Centralized tolerances and helpers for robust geometry

pub const EPS_POS: f32 = 1e-4;            // point coincidence threshold (px)
pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold
pub const EPS_DENOM: f32 = 1e-8;          // denominator guard for ratios/inversion

// Interaction defaults (px); overridable through EditorConfig
pub const CLOSE_TOL: f32 = 10.0;          // first/last anchor coincidence for closed paths
pub const REMOVE_TOL: f32 = 5.0;          // anchor pick radius for point removal
pub const INSERT_TOL: f32 = 10.0;         // chord pick radius for point insertion

// Arc-length parametrization
pub const ARC_PANELS: usize = 16;         // composite Gauss-Legendre panels per quadratic
pub const ARC_SUBSTEPS: usize = 100;      // linear substeps when inverting length -> t

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }
