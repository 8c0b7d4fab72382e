//! 2D affine matrices in canvas order `[a, b, c, d, e, f]`.
//!
//! A point maps as `x' = a·x + c·y + e`, `y' = b·x + d·y + f`. Composition
//! reads right to left: `m1.mul(m2)` applies `m2` first.

use super::tolerance::EPS_DENOM;
use crate::model::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine(pub [f32; 6]);

/// Result of splitting a matrix into translation, rotation, scale and skew.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposed {
    pub translate_x: f32,
    pub translate_y: f32,
    /// Degrees.
    pub angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees.
    pub skew_x: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Affine::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub fn translate(tx: f32, ty: f32) -> Affine {
        Affine([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    pub fn rotate_deg(deg: f32) -> Affine {
        let (s, c) = deg.to_radians().sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    pub fn scale(sx: f32, sy: f32) -> Affine {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    pub fn mul(&self, o: &Affine) -> Affine {
        let a = &self.0;
        let b = &o.0;
        Affine([
            a[0] * b[0] + a[2] * b[1],
            a[1] * b[0] + a[3] * b[1],
            a[0] * b[2] + a[2] * b[3],
            a[1] * b[2] + a[3] * b[3],
            a[0] * b[4] + a[2] * b[5] + a[4],
            a[1] * b[4] + a[3] * b[5] + a[5],
        ])
    }

    pub fn determinant(&self) -> f32 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// `None` for singular (or non-finite) matrices.
    pub fn invert(&self) -> Option<Affine> {
        let [a, b, c, d, e, f] = self.0;
        let det = self.determinant();
        if det.abs() <= EPS_DENOM || !det.is_finite() {
            return None;
        }
        let r = 1.0 / det;
        Some(Affine([
            d * r,
            -b * r,
            -c * r,
            a * r,
            (c * f - d * e) * r,
            (b * e - a * f) * r,
        ]))
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.0;
        Vec2 {
            x: a * p.x + c * p.y + e,
            y: b * p.x + d * p.y + f,
        }
    }

    /// Apply the linear part only (no translation).
    pub fn apply_vector(&self, v: Vec2) -> Vec2 {
        let [a, b, c, d, _, _] = self.0;
        Vec2 {
            x: a * v.x + c * v.y,
            y: b * v.x + d * v.y,
        }
    }

    pub fn translation(&self) -> Vec2 {
        Vec2 {
            x: self.0[4],
            y: self.0[5],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// QR decomposition: rotation first, then x scale, then skew along x.
    pub fn decompose(&self) -> Decomposed {
        let [a, b, c, d, e, f] = self.0;
        let denom = a * a + b * b;
        let scale_x = denom.sqrt();
        let scale_y = if scale_x > EPS_DENOM {
            (a * d - c * b) / scale_x
        } else {
            0.0
        };
        let skew_x = (a * c + b * d).atan2(denom).to_degrees();
        Decomposed {
            translate_x: e,
            translate_y: f,
            angle: b.atan2(a).to_degrees(),
            scale_x,
            scale_y,
            skew_x,
        }
    }
}
