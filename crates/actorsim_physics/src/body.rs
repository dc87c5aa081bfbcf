//! Rigid body and shape descriptors

use glam::Vec3;
use slotmap::new_key_type;

use crate::collision::CollisionFilter;
use crate::geometry::Geometry;
use crate::material::PhysicsMaterial;
use crate::pose::Pose;

new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Generational: once a body is removed its key never resolves again,
    /// even if the slot is reused by a later body.
    pub struct BodyKey;
}

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Never moves; infinite mass
    Static,
    /// Moved by script through kinematic targets; ignores forces
    Kinematic,
    /// Integrated from forces, torques and gravity
    Dynamic,
}

/// Description of one collision shape as the engine stores it
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDesc {
    pub geometry: Geometry,
    /// Shape frame relative to the body frame
    pub local_pose: Pose,
    pub material: PhysicsMaterial,
    pub filter: CollisionFilter,
    /// Trigger shapes report overlaps instead of contacts
    pub is_trigger: bool,
}

impl ShapeDesc {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            local_pose: Pose::IDENTITY,
            material: PhysicsMaterial::default(),
            filter: CollisionFilter::default(),
            is_trigger: false,
        }
    }

    pub fn with_local_pose(mut self, pose: Pose) -> Self {
        self.local_pose = pose;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }
}

/// A rigid body: pose, velocities, inertial properties and attached shapes
#[derive(Clone, Debug)]
pub struct RigidBody {
    pub body_type: BodyType,
    /// World pose of the body frame
    pub pose: Pose,
    /// Linear velocity of the center of mass (world frame)
    pub linear_velocity: Vec3,
    /// Angular velocity (world frame)
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Diagonal inertia tensor in the mass frame
    pub inertia: Vec3,
    /// Center-of-mass frame relative to the body frame
    pub cmass_local_pose: Pose,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub affected_by_gravity: bool,
    pub(crate) shapes: Vec<ShapeDesc>,
    pub(crate) force: Vec3,
    pub(crate) torque: Vec3,
    pub(crate) kinematic_target: Option<Pose>,
    /// Velocity derived from last step's target, cleared on the next step
    pub(crate) target_velocity: bool,
}

impl RigidBody {
    fn with_type(body_type: BodyType, pose: Pose) -> Self {
        Self {
            body_type,
            pose,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            inertia: Vec3::ONE,
            cmass_local_pose: Pose::IDENTITY,
            linear_damping: 0.0,
            angular_damping: 0.05,
            affected_by_gravity: body_type == BodyType::Dynamic,
            shapes: Vec::new(),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            kinematic_target: None,
            target_velocity: false,
        }
    }

    /// Create a static body at the given pose
    pub fn new_static(pose: Pose) -> Self {
        Self::with_type(BodyType::Static, pose)
    }

    /// Create a kinematic body at the given pose
    pub fn new_kinematic(pose: Pose) -> Self {
        Self::with_type(BodyType::Kinematic, pose)
    }

    /// Create a dynamic body at the given pose with unit mass and inertia
    pub fn new_dynamic(pose: Pose) -> Self {
        Self::with_type(BodyType::Dynamic, pose)
    }

    /// Set the mass; non-positive values are raised to a tiny positive mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(f32::EPSILON);
        self
    }

    /// Set the diagonal inertia tensor in the mass frame
    pub fn with_inertia(mut self, inertia: Vec3) -> Self {
        self.inertia = inertia.max(Vec3::ZERO);
        self
    }

    pub fn with_cmass_local_pose(mut self, pose: Pose) -> Self {
        self.cmass_local_pose = pose;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected && self.body_type == BodyType::Dynamic;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Shapes attached to this body, in attachment order
    pub fn shapes(&self) -> &[ShapeDesc] {
        &self.shapes
    }

    /// World position of the center of mass
    pub fn center_of_mass(&self) -> Vec3 {
        self.pose.transform_point(self.cmass_local_pose.p)
    }

    /// Force accumulated for the next step
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated for the next step
    pub fn pending_torque(&self) -> Vec3 {
        self.torque
    }
}
