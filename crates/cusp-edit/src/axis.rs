//! Per-tooth local coordinate frames

use cusp_core::frame;
use cusp_pose::PoseRecord;
use glam::{DMat4, DQuat, DVec3};

/// Where a tooth's local coordinate system sits in world space.
///
/// Built once from the tooth's pose row and never mutated. The orientation
/// is frame-in-world and is applied directly: a frame rotated +90° about Z
/// has its local X axis along world +Y. Inverting it here would mirror
/// every rotation edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    position: DVec3,
    orientation: DQuat,
}

impl AxisFrame {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation: frame::normalize_orientation(orientation),
        }
    }

    pub fn from_record(record: &PoseRecord) -> Self {
        Self::new(record.position, record.orientation)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    /// Local-to-world matrix of the frame.
    pub fn matrix(&self) -> DMat4 {
        frame::build_rigid_transform(self.position, self.orientation)
    }
}
