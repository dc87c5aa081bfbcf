//! Step, contact and trigger events and their typed listeners

use actorsim_physics::{Contact, ContactPhase, PhysicsMaterial, TriggerPhase};

use crate::actor::ActorId;
use crate::error::ListenerResult;

/// Published by an actor once per simulation tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepEvent {
    pub actor: ActorId,
    /// The scene timestep of this tick, in seconds
    pub time: f32,
}

/// What two actors' shapes are doing to each other
#[derive(Clone, Debug, PartialEq)]
pub struct ContactDetail {
    pub phase: ContactPhase,
    /// Index of the receiving actor's shape in its collision shape list
    pub self_shape: usize,
    /// Index of the other actor's shape in its collision shape list
    pub other_shape: usize,
    /// Contact points with normals pointing toward the receiving actor;
    /// empty when the contact was lost
    pub points: Vec<Contact>,
    /// Combined surface material of the two shapes
    pub material: PhysicsMaterial,
}

/// Delivered to each actor of a touching pair
#[derive(Clone, Debug, PartialEq)]
pub struct ContactEvent {
    pub self_actor: ActorId,
    pub other_actor: ActorId,
    pub contact: ContactDetail,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerDetail {
    pub phase: TriggerPhase,
    pub trigger_shape: usize,
    pub other_shape: usize,
}

/// Delivered to the actor owning the trigger shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    pub trigger_actor: ActorId,
    pub other_actor: ActorId,
    pub trigger: TriggerDetail,
}

/// Observer of step events
pub trait StepListener {
    fn on_step(&mut self, actor: ActorId, time: f32) -> ListenerResult;
}

/// Observer of contact events
pub trait ContactListener {
    fn on_contact(&mut self, self_actor: ActorId, other_actor: ActorId, contact: &ContactDetail) -> ListenerResult;
}

/// Observer of trigger events
pub trait TriggerListener {
    fn on_trigger(&mut self, trigger_actor: ActorId, other_actor: ActorId, trigger: &TriggerDetail) -> ListenerResult;
}
