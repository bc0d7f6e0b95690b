//! A single parsed pose row

use cusp_core::ToothId;
use glam::{DQuat, DVec3};
use serde::Serialize;
use std::fmt;

/// Where one tooth's local frame sits in world space.
///
/// `orientation` is always unit length and uses the frame-in-world
/// convention: it rotates local axes into world axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseRecord {
    pub tooth_id: ToothId,
    pub position: DVec3,
    pub orientation: DQuat,
}

impl fmt::Display for PoseRecord {
    /// Canonical table row: `id px py pz qx qy qz qw`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        let q = self.orientation;
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.tooth_id, p.x, p.y, p.z, q.x, q.y, q.z, q.w
        )
    }
}
