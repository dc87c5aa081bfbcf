//! actorsim - actors binding rigid bodies to their presentation
//!
//! Re-exports the actor layer and adds what an application needs around it:
//! layered configuration, a [`Scene`] that owns and steps actors, and an
//! [`ActorBuilder`].

pub mod builder;
pub mod config;
pub mod scene;

pub use builder::ActorBuilder;
pub use config::{AppConfig, ConfigError};
pub use scene::{ActorDesc, Drive, Scene, SceneError};

pub use actorsim_core::{
    Actor, ActorError, ActorId, ActorType, CollisionShape, ContactDetail, ContactEvent,
    ContactListener, DriveKey, DynamicActor, EmitError, KinematicActor, ListenerResult,
    ListenerToken, SceneActor, StaticActor, StepListener, TriggerDetail, TriggerEvent,
    TriggerListener,
};
pub use actorsim_physics::{
    CollisionFilter, CollisionLayer, ContactPhase, Pose, Quat, TriggerPhase, Vec3,
};
pub use actorsim_render::{RenderBody, SceneBody};
