//! Rigid-frame math.
//!
//! Matrices are column-major and act on column vectors, so
//! `compose(a, b)` applied to a point runs `b` first and `a` second:
//! `world = a * b * local`. Everything here is pure.

use crate::types::Transform;
use glam::{DMat4, DQuat, DVec3};

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Quaternions shorter than this cannot be normalized and become identity.
const MIN_QUAT_LENGTH: f64 = 1e-12;

/// Normalize an orientation to unit length.
///
/// A zero-length or non-finite quaternion becomes identity.
pub fn normalize_orientation(q: DQuat) -> DQuat {
    let len = q.length();
    if !len.is_finite() || len < MIN_QUAT_LENGTH {
        return DQuat::IDENTITY;
    }
    q.normalize()
}

/// Normalize and pick the representative with a non-negative scalar part,
/// so identity-like rotations never come back as `(0, 0, 0, -1)`.
pub fn canonical_orientation(q: DQuat) -> DQuat {
    let q = normalize_orientation(q);
    if q.w < 0.0 {
        -q
    } else {
        q
    }
}

/// Rotation from a (re-normalized) orientation plus translation, unit scale.
pub fn build_rigid_transform(position: DVec3, orientation: DQuat) -> DMat4 {
    DMat4::from_rotation_translation(normalize_orientation(orientation), position)
}

/// Exact matrix inverse.
///
/// A singular input is an invariant violation: it panics in debug builds
/// and falls back to identity in release builds so NaNs never reach the
/// scene.
pub fn invert(m: DMat4) -> DMat4 {
    let det = m.determinant();
    let singular = !det.is_finite() || det.abs() <= SINGULAR_EPSILON;
    debug_assert!(!singular, "attempted to invert a singular transform (det = {})", det);
    if singular {
        tracing::error!(det, "singular transform inversion, using identity");
        return DMat4::IDENTITY;
    }
    m.inverse()
}

/// `a` is the outer (world) transform, `b` the inner (local) one.
pub fn compose(a: DMat4, b: DMat4) -> DMat4 {
    a * b
}

/// Extract translation, canonical unit rotation and per-axis scale.
pub fn decompose(m: DMat4) -> Transform {
    let (scale, rotation, translation) = m.to_scale_rotation_translation();
    Transform {
        position: translation,
        orientation: canonical_orientation(rotation),
        scale,
    }
}

/// Express `entity_world` inside the coordinate system of `axis_world`:
/// `invert(axis_world) * entity_world`.
///
/// This is the formula behind movable-transform initialization: with the
/// result as the local transform, `compose(axis_world, local)` reproduces
/// `entity_world`.
pub fn compute_local_from_world(entity_world: DMat4, axis_world: DMat4) -> DMat4 {
    compose(invert(axis_world), entity_world)
}
