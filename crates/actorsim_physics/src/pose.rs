//! Rigid transform (position and orientation)
//!
//! A Pose is the world or local frame of a body or shape. There is no scale:
//! physics frames are rigid.

use glam::{Quat, Vec3};

/// A rigid transform with a position and a unit-quaternion orientation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Translation
    pub p: Vec3,
    /// Orientation (kept normalized)
    pub q: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity pose (origin, no rotation)
    pub const IDENTITY: Self = Self {
        p: Vec3::ZERO,
        q: Quat::IDENTITY,
    };

    /// Create a pose from a position and rotation
    pub fn new(p: Vec3, q: Quat) -> Self {
        Self { p, q: q.normalize() }
    }

    /// Create a pose with just a position
    pub fn from_position(p: Vec3) -> Self {
        Self { p, q: Quat::IDENTITY }
    }

    /// Transform a point from this frame into the parent frame
    ///
    /// Applies rotation, then translation.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.q * point + self.p
    }

    /// Rotate a direction from this frame into the parent frame
    #[inline]
    pub fn rotate(&self, direction: Vec3) -> Vec3 {
        self.q * direction
    }

    /// Rotate a direction from the parent frame into this frame
    #[inline]
    pub fn rotate_inv(&self, direction: Vec3) -> Vec3 {
        self.q.conjugate() * direction
    }

    /// Compute the inverse pose
    ///
    /// `pose.inverse().transform_point(pose.transform_point(x)) == x`
    pub fn inverse(&self) -> Self {
        let q = self.q.conjugate();
        Self { p: q * -self.p, q }
    }

    /// Compose two poses: result = self * other
    ///
    /// The composed pose applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            p: self.transform_point(other.p),
            q: (self.q * other.q).normalize(),
        }
    }

    /// Check that every component is finite and the rotation is unit length
    pub fn is_valid(&self) -> bool {
        self.p.is_finite() && self.q.is_finite() && self.q.is_normalized()
    }
}
