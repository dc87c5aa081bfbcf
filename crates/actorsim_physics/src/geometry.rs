//! Collision geometry
//!
//! These are the lightweight primitives a shape is built from. Geometry is
//! described in the shape's local frame; [`Geometry::to_world`] places it in
//! world space for collision detection.

use glam::{Quat, Vec3};

use crate::error::PhysicsError;
use crate::pose::Pose;

/// Geometry of one collision shape, in shape-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Sphere centered at the shape origin
    Sphere { radius: f32 },
    /// Box centered at the shape origin
    Box { half_extents: Vec3 },
    /// Infinite plane through the shape origin
    ///
    /// Only static bodies may carry plane shapes.
    Plane { normal: Vec3 },
}

impl Geometry {
    /// Create a sphere geometry
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius }
    }

    /// Create a box geometry from half-extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Geometry::Box { half_extents }
    }

    /// Create a plane geometry with the given normal
    pub fn plane(normal: Vec3) -> Self {
        Geometry::Plane { normal }
    }

    /// Whether this geometry may only be attached to static bodies
    pub fn requires_static(&self) -> bool {
        matches!(self, Geometry::Plane { .. })
    }

    /// Reject degenerate geometry
    ///
    /// Radii and half-extents must be finite and strictly positive; plane
    /// normals must be finite and non-zero.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        match *self {
            Geometry::Sphere { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(PhysicsError::DegenerateGeometry {
                        reason: format!("sphere radius must be positive, got {}", radius),
                    });
                }
            }
            Geometry::Box { half_extents } => {
                if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
                    return Err(PhysicsError::DegenerateGeometry {
                        reason: format!("box half-extents must be positive, got {:?}", half_extents),
                    });
                }
            }
            Geometry::Plane { normal } => {
                if !normal.is_finite() || normal.length_squared() < 1e-12 {
                    return Err(PhysicsError::DegenerateGeometry {
                        reason: format!("plane normal must be non-zero, got {:?}", normal),
                    });
                }
            }
        }
        Ok(())
    }

    /// Place this geometry in world space using the shape's world pose
    pub fn to_world(&self, world_pose: &Pose) -> WorldGeometry {
        match *self {
            Geometry::Sphere { radius } => WorldGeometry::Sphere {
                center: world_pose.p,
                radius,
            },
            Geometry::Box { half_extents } => WorldGeometry::Box {
                center: world_pose.p,
                rotation: world_pose.q,
                half_extents,
            },
            Geometry::Plane { normal } => {
                let n = world_pose.rotate(normal).normalize();
                WorldGeometry::Plane {
                    normal: n,
                    distance: n.dot(world_pose.p),
                }
            }
        }
    }
}

/// Geometry placed in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldGeometry {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Box {
        center: Vec3,
        rotation: Quat,
        half_extents: Vec3,
    },
    /// Plane equation: `normal . x = distance`
    Plane { normal: Vec3, distance: f32 },
}

impl WorldGeometry {
    /// Get the center of the geometry
    ///
    /// For planes, returns the point on the plane closest to the origin.
    pub fn center(&self) -> Vec3 {
        match *self {
            WorldGeometry::Sphere { center, .. } => center,
            WorldGeometry::Box { center, .. } => center,
            WorldGeometry::Plane { normal, distance } => normal * distance,
        }
    }
}
