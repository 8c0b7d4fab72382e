// Centralized ingestion limits to harden against untrusted input (persisted JSON)

// Scene size caps
pub const MAX_SHAPES: usize = 20_000;
pub const MAX_SHAPE_ID: u32 = 100_000;
pub const MAX_SEGMENTS_PER_PATH: usize = 10_000;
pub const MAX_NAME_LEN: usize = 1_024;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;
pub const WIDTH_MAX: f32 = 10_000.0;
pub const SCALE_MIN: f32 = 1e-4;
pub const SPACING_MAX: f32 = 10_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_width_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= WIDTH_MAX }

#[inline]
pub fn in_scale_bounds(s: f32) -> bool { s.is_finite() && s.abs() >= SCALE_MIN }
