//! Collision filtering and contact generation
//!
//! Provides layer/mask filtering between shapes and overlap tests for the
//! geometry pairs the world reports contacts for.

use bitflags::bitflags;
use glam::Vec3;

use crate::geometry::WorldGeometry;

bitflags! {
    /// Collision layers for filtering which shapes interact
    ///
    /// Each layer is a bit in a 32-bit mask. A shape may belong to several
    /// layers and declares which layers it reacts to via its mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most shapes
        const DEFAULT = 1 << 0;
        /// Fixed world geometry
        const STATIC = 1 << 1;
        /// Simulated bodies
        const DYNAMIC = 1 << 2;
        /// Script-driven bodies
        const KINEMATIC = 1 << 3;
        /// Trigger volumes (report overlap, never touch)
        const TRIGGER = 1 << 4;
        /// Small pieces that should not disturb anything else
        const DEBRIS = 1 << 5;
        /// Every layer
        const ALL = 0xFFFF_FFFF;
    }
}

/// Layer/mask pair deciding what a shape interacts with
///
/// Two shapes A and B interact when `A.layer & B.mask != 0` and
/// `B.layer & A.mask != 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this shape belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this shape reacts to
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::DEFAULT,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check whether both filters accept each other
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for fixed world geometry; reacts to everything
    pub fn static_world() -> Self {
        Self::new(CollisionLayer::STATIC, CollisionLayer::ALL)
    }

    /// Filter for a trigger volume detecting the given layers
    pub fn trigger(detects: CollisionLayer) -> Self {
        Self::new(CollisionLayer::TRIGGER, detects)
    }

    /// Filter for debris: collides with static geometry only
    pub fn debris() -> Self {
        Self::new(CollisionLayer::DEBRIS, CollisionLayer::STATIC)
    }
}

/// One point of contact between two shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// World-space contact point
    pub point: Vec3,
    /// Unit normal pointing from the second shape toward the first
    pub normal: Vec3,
    /// Overlap depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    pub fn new(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Same contact seen from the other shape
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }
}

/// Overlap test between two placed geometries
///
/// The normal of the returned contact points from `b` toward `a`. Box/box and
/// plane/plane pairs are not tested and always return `None`.
pub fn collide(a: &WorldGeometry, b: &WorldGeometry) -> Option<Contact> {
    use WorldGeometry::*;
    match (*a, *b) {
        (Sphere { center: ca, radius: ra }, Sphere { center: cb, radius: rb }) => {
            sphere_vs_sphere(ca, ra, cb, rb)
        }
        (Sphere { center, radius }, Plane { normal, distance }) => {
            sphere_vs_plane(center, radius, normal, distance)
        }
        (Plane { normal, distance }, Sphere { center, radius }) => {
            sphere_vs_plane(center, radius, normal, distance).map(|c| c.flipped())
        }
        (Sphere { center, radius }, Box { center: bc, rotation, half_extents }) => {
            sphere_vs_box(center, radius, bc, rotation, half_extents)
        }
        (Box { center: bc, rotation, half_extents }, Sphere { center, radius }) => {
            sphere_vs_box(center, radius, bc, rotation, half_extents).map(|c| c.flipped())
        }
        (Box { center, rotation, half_extents }, Plane { normal, distance }) => {
            box_vs_plane(center, rotation, half_extents, normal, distance)
        }
        (Plane { normal, distance }, Box { center, rotation, half_extents }) => {
            box_vs_plane(center, rotation, half_extents, normal, distance).map(|c| c.flipped())
        }
        (Box { .. }, Box { .. }) | (Plane { .. }, Plane { .. }) => None,
    }
}

/// Sphere vs sphere; normal points from B toward A
pub fn sphere_vs_sphere(ca: Vec3, ra: f32, cb: Vec3, rb: f32) -> Option<Contact> {
    let delta = ca - cb;
    let dist_sq = delta.length_squared();
    let min_dist = ra + rb;
    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers: pick an arbitrary separating axis
    let normal = if dist > 1e-6 { delta / dist } else { Vec3::Z };
    let point = cb + normal * rb;
    Some(Contact::new(point, normal, min_dist - dist))
}

/// Sphere vs plane; normal is the plane normal
pub fn sphere_vs_plane(center: Vec3, radius: f32, normal: Vec3, distance: f32) -> Option<Contact> {
    let signed_dist = normal.dot(center) - distance;
    let penetration = radius - signed_dist;
    if penetration <= 0.0 {
        return None;
    }
    let point = center - normal * radius;
    Some(Contact::new(point, normal, penetration))
}

/// Sphere vs oriented box; normal points from the box toward the sphere
pub fn sphere_vs_box(
    center: Vec3,
    radius: f32,
    box_center: Vec3,
    rotation: glam::Quat,
    half_extents: Vec3,
) -> Option<Contact> {
    let local = rotation.conjugate() * (center - box_center);
    let closest = local.clamp(-half_extents, half_extents);
    let delta = local - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }

    let (local_normal, penetration) = if dist_sq > 1e-12 {
        let dist = dist_sq.sqrt();
        (delta / dist, radius - dist)
    } else {
        // Center inside the box: escape through the nearest face
        let depth = half_extents - local.abs();
        let axis = if depth.x <= depth.y && depth.x <= depth.z {
            Vec3::X * local.x.signum()
        } else if depth.y <= depth.z {
            Vec3::Y * local.y.signum()
        } else {
            Vec3::Z * local.z.signum()
        };
        (axis, depth.min_element() + radius)
    };

    let point = box_center + rotation * closest;
    Some(Contact::new(point, rotation * local_normal, penetration))
}

/// Oriented box vs plane; normal is the plane normal
///
/// Reports the deepest corner below the plane.
pub fn box_vs_plane(
    center: Vec3,
    rotation: glam::Quat,
    half_extents: Vec3,
    normal: Vec3,
    distance: f32,
) -> Option<Contact> {
    let local_normal = rotation.conjugate() * normal;
    // Corner furthest against the normal
    let corner = -half_extents * local_normal.signum();
    let world_corner = center + rotation * corner;
    let signed_dist = normal.dot(world_corner) - distance;
    if signed_dist >= 0.0 {
        return None;
    }
    Some(Contact::new(world_corner, normal, -signed_dist))
}
