//! Actor abstraction layer for rigid-body simulation
//!
//! This crate provides:
//! - [`Actor`] - binds one physics body to visual and collision-debug bodies,
//!   owns collision shapes, tracks drives and publishes step events
//! - Dynamic-body operations (velocity, forces, damping, inertia) on actors
//!   whose handle implements [`RigidDynamicHandle`](actorsim_physics::RigidDynamicHandle)
//! - [`EventEmitter`] - ordered, single-threaded publish/subscribe
//! - Step, contact and trigger events with typed listener traits

pub mod actor;
pub mod clock;
mod dynamic;
pub mod error;
pub mod event;
pub mod events;
pub mod shape;

pub use actor::{Actor, ActorId, ActorType, DriveKey, SceneActor};
pub use clock::SceneClock;
pub use error::{ActorError, EmitError, ListenerError, ListenerFailure, ListenerResult};
pub use event::{EventEmitter, ListenerToken};
pub use events::{
    ContactDetail, ContactEvent, ContactListener, StepEvent, StepListener, TriggerDetail,
    TriggerEvent, TriggerListener,
};
pub use shape::CollisionShape;

use actorsim_physics::{DynamicBodyHandle, KinematicBodyHandle, StaticBodyHandle};

/// Actor on a body that never moves
pub type StaticActor = Actor<StaticBodyHandle>;
/// Actor on a script-driven body
pub type KinematicActor = Actor<KinematicBodyHandle>;
/// Actor on a simulated body with mass and inertia
pub type DynamicActor = Actor<DynamicBodyHandle>;
