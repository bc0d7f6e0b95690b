//! One-shot movable transform initialization

use crate::axis::AxisFrame;
use cusp_core::{frame, Transform};
use glam::DMat4;

/// The editable pose of a tooth, relative to its axis frame.
///
/// The only transition is `Uninitialized → Ready`, taken once when both the
/// axis frame and the geometry exist. Re-running it after an edit would snap
/// the tooth back, so [`MovableState::initialize`] refuses to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MovableState {
    #[default]
    Uninitialized,
    Ready(Transform),
}

impl MovableState {
    pub fn is_ready(&self) -> bool {
        matches!(self, MovableState::Ready(_))
    }

    pub fn transform(&self) -> Option<&Transform> {
        match self {
            MovableState::Ready(t) => Some(t),
            MovableState::Uninitialized => None,
        }
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        match self {
            MovableState::Ready(t) => Some(t),
            MovableState::Uninitialized => None,
        }
    }

    /// Derive the movable transform so that `axis ∘ movable` reproduces the
    /// geometry's current world placement, then reset the geometry's own
    /// transform to identity.
    ///
    /// Loaded geometry is authored in world space, so `geometry_local` is
    /// normally identity and the result is simply `invert(axis)`.
    ///
    /// Returns `false` without touching anything when already ready.
    pub fn initialize(&mut self, axis: &AxisFrame, geometry_local: &mut DMat4) -> bool {
        if self.is_ready() {
            return false;
        }
        let local = frame::compute_local_from_world(*geometry_local, axis.matrix());
        *self = MovableState::Ready(frame::decompose(local));
        *geometry_local = DMat4::IDENTITY;
        true
    }
}
