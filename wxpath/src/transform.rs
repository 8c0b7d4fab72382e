use crate::geometry::affine::Affine;
use crate::model::Vec2;
use serde::{Deserialize, Serialize};

/// Object-level placement of a shape in the scene, center origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    pub center: Vec2,
    /// Degrees, clockwise in a y-down frame.
    pub angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        ObjectTransform {
            center: Vec2::ZERO,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl ObjectTransform {
    pub fn at(center: Vec2) -> Self {
        ObjectTransform {
            center,
            ..Default::default()
        }
    }

    /// `T(center) · R(angle) · S(sx, sy)`
    pub fn calc_transform_matrix(&self) -> Affine {
        Affine::translate(self.center.x, self.center.y)
            .mul(&Affine::rotate_deg(self.angle))
            .mul(&Affine::scale(self.scale_x, self.scale_y))
    }

    /// Rotation and scale without the translation.
    pub fn linear(&self) -> Affine {
        Affine::rotate_deg(self.angle).mul(&Affine::scale(self.scale_x, self.scale_y))
    }

    pub fn is_unit_scale(&self) -> bool {
        self.scale_x == 1.0 && self.scale_y == 1.0
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.angle.is_finite()
            && self.scale_x.is_finite()
            && self.scale_y.is_finite()
    }
}
