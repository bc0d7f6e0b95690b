//! Spatial types

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A 3D transform with position, unit-quaternion orientation, and scale.
///
/// This is the decomposed form of an affine matrix. The editable pose of a
/// tooth is held in this form, relative to the tooth's axis frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub orientation: DQuat,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        orientation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: DQuat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    /// Decompose an affine matrix (see [`crate::frame::decompose`]).
    pub fn from_matrix(m: DMat4) -> Self {
        crate::frame::decompose(m)
    }

    /// Convert to a 4x4 transformation matrix (column-major), applying
    /// scale, then rotation, then translation.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }

    /// Compare component-wise within `tolerance`. Orientations are compared
    /// up to sign, since `q` and `-q` are the same rotation.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f64) -> bool {
        let same_rotation = self.orientation.abs_diff_eq(other.orientation, tolerance)
            || self.orientation.abs_diff_eq(-other.orientation, tolerance);
        self.position.abs_diff_eq(other.position, tolerance)
            && self.scale.abs_diff_eq(other.scale, tolerance)
            && same_rotation
    }
}
