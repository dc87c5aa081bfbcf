//! Collision shapes owned by actors

use actorsim_physics::{CollisionFilter, Geometry, PhysicsMaterial, Pose, ShapeDesc, Vec3};

use crate::actor::ActorId;

/// One piece of collidable geometry
///
/// A shape is created free-standing and moves into an actor through
/// [`Actor::attach_shape`](crate::Actor::attach_shape); from then on the actor
/// owns it and the shape records which actor that is. There is no detach.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionShape {
    desc: ShapeDesc,
    actor: Option<ActorId>,
}

impl CollisionShape {
    pub fn new(desc: ShapeDesc) -> Self {
        Self { desc, actor: None }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(ShapeDesc::new(Geometry::sphere(radius)))
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ShapeDesc::new(Geometry::cuboid(half_extents)))
    }

    pub fn plane(normal: Vec3) -> Self {
        Self::new(ShapeDesc::new(Geometry::plane(normal)))
    }

    pub fn with_local_pose(mut self, pose: Pose) -> Self {
        self.desc.local_pose = pose;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.desc.material = material;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.desc.filter = filter;
        self
    }

    /// Make this a trigger volume (overlap reports only)
    pub fn as_trigger(mut self) -> Self {
        self.desc.is_trigger = true;
        self
    }

    /// The engine-facing description
    pub fn desc(&self) -> &ShapeDesc {
        &self.desc
    }

    pub fn geometry(&self) -> &Geometry {
        &self.desc.geometry
    }

    pub fn local_pose(&self) -> Pose {
        self.desc.local_pose
    }

    pub fn material(&self) -> &PhysicsMaterial {
        &self.desc.material
    }

    pub fn is_trigger(&self) -> bool {
        self.desc.is_trigger
    }

    /// The actor owning this shape, once attached
    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub(crate) fn set_actor(&mut self, actor: ActorId) {
        self.actor = Some(actor);
    }
}
