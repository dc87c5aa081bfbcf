//! Rigid-body physics provider for actorsim
//!
//! This crate provides:
//! - Poses and collision geometry (spheres, boxes, planes)
//! - Surface materials and layer/mask collision filtering
//! - A physics world integrating forces, torques, gravity and damping
//! - Contact and trigger reports with found/persist/lost tracking
//! - Body handles implementing the capability traits the actor layer uses

pub mod body;
pub mod collision;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod material;
pub mod pose;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody, ShapeDesc};
pub use collision::{collide, CollisionFilter, CollisionLayer, Contact};
pub use error::{PhysicsError, PhysicsResult};
pub use geometry::{Geometry, WorldGeometry};
pub use handle::{
    DynamicBodyHandle, KinematicBodyHandle, RigidActorHandle, RigidDynamicHandle, SharedWorld,
    StaticBodyHandle,
};
pub use material::{CombineMode, PhysicsMaterial};
pub use pose::Pose;
pub use world::{
    ContactPhase, ContactReport, PhysicsConfig, PhysicsWorld, ShapePair, StepReport, TriggerPhase,
    TriggerReport,
};

// Math types used throughout the public API
pub use glam::{Quat, Vec3};
