//! Body handles: the capability surface the actor layer talks to
//!
//! [`RigidActorHandle`] and [`RigidDynamicHandle`] describe what any physics
//! engine must offer for one body. The handles in this module implement them
//! on top of a shared [`PhysicsWorld`]. A handle does not keep the world
//! alive; using a handle after the world or the body is gone is a
//! programming error and panics.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec3;

use crate::body::{BodyKey, BodyType, RigidBody, ShapeDesc};
use crate::error::{PhysicsError, PhysicsResult};
use crate::pose::Pose;
use crate::world::PhysicsWorld;

/// A physics world shared between the scene driver and body handles
pub type SharedWorld = Rc<RefCell<PhysicsWorld>>;

/// Capabilities every body offers, whatever its type
pub trait RigidActorHandle {
    /// World pose of the body frame
    fn global_pose(&self) -> Pose;

    /// Bind a shape into the body; the engine may reject the geometry
    fn attach_shape(&self, shape: &ShapeDesc) -> PhysicsResult<()>;

    fn body_type(&self) -> BodyType;
}

/// Capabilities of bodies with mass and inertia
pub trait RigidDynamicHandle: RigidActorHandle {
    fn linear_velocity(&self) -> Vec3;
    fn angular_velocity(&self) -> Vec3;
    fn set_linear_velocity(&self, velocity: Vec3);
    fn set_angular_velocity(&self, velocity: Vec3);

    /// Accumulate a force at the center of mass
    fn add_force(&self, force: Vec3);
    /// Accumulate a world-frame torque
    fn add_torque(&self, torque: Vec3);

    fn set_linear_damping(&self, damping: f32);
    fn set_angular_damping(&self, damping: f32);

    fn mass(&self) -> f32;
    /// Diagonal inertia tensor in the mass frame
    fn mass_space_inertia(&self) -> Vec3;
    /// Center-of-mass frame relative to the body frame
    fn cmass_local_pose(&self) -> Pose;

    /// Apply a force at a world-space point
    ///
    /// Adds the force at the center of mass plus the torque
    /// `(point - com) x force`.
    fn add_force_at_pos(&self, force: Vec3, point: Vec3) {
        let com = self.global_pose().transform_point(self.cmass_local_pose().p);
        self.add_force(force);
        self.add_torque((point - com).cross(force));
    }
}

/// Weak reference to one body in a shared world
#[derive(Clone, Debug)]
struct BodyRef {
    world: Weak<RefCell<PhysicsWorld>>,
    key: BodyKey,
}

impl BodyRef {
    fn new(world: &SharedWorld, key: BodyKey, expected: &[BodyType]) -> PhysicsResult<Self> {
        let body_type = world
            .borrow()
            .get_body(key)
            .map(|b| b.body_type)
            .ok_or(PhysicsError::StaleBody(key))?;
        if !expected.contains(&body_type) {
            return Err(match expected.first() {
                Some(BodyType::Kinematic) => PhysicsError::NotKinematic(key),
                _ => PhysicsError::NotDynamic(key),
            });
        }
        Ok(Self {
            world: Rc::downgrade(world),
            key,
        })
    }

    #[track_caller]
    fn world(&self) -> SharedWorld {
        match self.world.upgrade() {
            Some(world) => world,
            None => panic!("physics world released while body {:?} is still referenced", self.key),
        }
    }

    #[track_caller]
    fn read<R>(&self, f: impl FnOnce(&RigidBody) -> R) -> R {
        let world = self.world();
        let guard = world.borrow();
        let result = match guard.get_body(self.key) {
            Some(body) => f(body),
            None => panic!("body {:?} was removed from the physics world", self.key),
        };
        result
    }

    #[track_caller]
    fn write<R>(&self, f: impl FnOnce(&mut PhysicsWorld, BodyKey) -> PhysicsResult<R>) -> R {
        let world = self.world();
        let mut guard = world.borrow_mut();
        let result = match f(&mut *guard, self.key) {
            Ok(value) => value,
            Err(err) => panic!("invalid operation on body {:?}: {}", self.key, err),
        };
        result
    }

    fn attach(&self, shape: &ShapeDesc) -> PhysicsResult<()> {
        let world = self.world.upgrade().ok_or(PhysicsError::WorldReleased)?;
        let index = world.borrow_mut().attach_shape(self.key, shape.clone())?;
        log::debug!("attached shape #{} to body {:?}", index, self.key);
        Ok(())
    }
}

/// Handle to a static body
#[derive(Clone, Debug)]
pub struct StaticBodyHandle(BodyRef);

impl StaticBodyHandle {
    pub fn new(world: &SharedWorld, key: BodyKey) -> PhysicsResult<Self> {
        BodyRef::new(world, key, &[BodyType::Static]).map(Self)
    }

    pub fn key(&self) -> BodyKey {
        self.0.key
    }
}

impl RigidActorHandle for StaticBodyHandle {
    fn global_pose(&self) -> Pose {
        self.0.read(|b| b.pose)
    }

    fn attach_shape(&self, shape: &ShapeDesc) -> PhysicsResult<()> {
        self.0.attach(shape)
    }

    fn body_type(&self) -> BodyType {
        BodyType::Static
    }
}

/// Handle to a kinematic body
#[derive(Clone, Debug)]
pub struct KinematicBodyHandle(BodyRef);

impl KinematicBodyHandle {
    pub fn new(world: &SharedWorld, key: BodyKey) -> PhysicsResult<Self> {
        BodyRef::new(world, key, &[BodyType::Kinematic]).map(Self)
    }

    pub fn key(&self) -> BodyKey {
        self.0.key
    }

    /// Move the body to `target` during the next step
    pub fn set_kinematic_target(&self, target: Pose) {
        self.0.write(|world, key| world.set_kinematic_target(key, target))
    }
}

impl RigidActorHandle for KinematicBodyHandle {
    fn global_pose(&self) -> Pose {
        self.0.read(|b| b.pose)
    }

    fn attach_shape(&self, shape: &ShapeDesc) -> PhysicsResult<()> {
        self.0.attach(shape)
    }

    fn body_type(&self) -> BodyType {
        BodyType::Kinematic
    }
}

/// Handle to a dynamic body
#[derive(Clone, Debug)]
pub struct DynamicBodyHandle(BodyRef);

impl DynamicBodyHandle {
    pub fn new(world: &SharedWorld, key: BodyKey) -> PhysicsResult<Self> {
        BodyRef::new(world, key, &[BodyType::Dynamic]).map(Self)
    }

    pub fn key(&self) -> BodyKey {
        self.0.key
    }
}

impl RigidActorHandle for DynamicBodyHandle {
    fn global_pose(&self) -> Pose {
        self.0.read(|b| b.pose)
    }

    fn attach_shape(&self, shape: &ShapeDesc) -> PhysicsResult<()> {
        self.0.attach(shape)
    }

    fn body_type(&self) -> BodyType {
        BodyType::Dynamic
    }
}

impl RigidDynamicHandle for DynamicBodyHandle {
    fn linear_velocity(&self) -> Vec3 {
        self.0.read(|b| b.linear_velocity)
    }

    fn angular_velocity(&self) -> Vec3 {
        self.0.read(|b| b.angular_velocity)
    }

    fn set_linear_velocity(&self, velocity: Vec3) {
        self.0.write(|world, key| {
            world.get_body_mut(key).ok_or(PhysicsError::StaleBody(key))?.linear_velocity = velocity;
            Ok(())
        })
    }

    fn set_angular_velocity(&self, velocity: Vec3) {
        self.0.write(|world, key| {
            world.get_body_mut(key).ok_or(PhysicsError::StaleBody(key))?.angular_velocity = velocity;
            Ok(())
        })
    }

    fn add_force(&self, force: Vec3) {
        self.0.write(|world, key| world.add_force(key, force))
    }

    fn add_torque(&self, torque: Vec3) {
        self.0.write(|world, key| world.add_torque(key, torque))
    }

    fn set_linear_damping(&self, damping: f32) {
        let angular = self.0.read(|b| b.angular_damping);
        self.0.write(|world, key| world.set_damping(key, damping, angular))
    }

    fn set_angular_damping(&self, damping: f32) {
        let linear = self.0.read(|b| b.linear_damping);
        self.0.write(|world, key| world.set_damping(key, linear, damping))
    }

    fn mass(&self) -> f32 {
        self.0.read(|b| b.mass)
    }

    fn mass_space_inertia(&self) -> Vec3 {
        self.0.read(|b| b.inertia)
    }

    fn cmass_local_pose(&self) -> Pose {
        self.0.read(|b| b.cmass_local_pose)
    }
}
