//! Actor: one physics body bound to its visual and collision-debug bodies
//!
//! An actor owns its collision shapes and three event emitters. Everything
//! else it talks to is owned elsewhere and reached through keys or weak
//! links:
//! - the physics body, through a handle implementing [`RigidActorHandle`]
//! - visual and debug bodies, through [`RenderBodyKey`]s into a [`RenderScene`]
//! - drives, through [`DriveKey`]s into the scene's drive registry
//! - the scene clock, through a weak link read by [`Actor::prestep`]

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use actorsim_physics::{BodyType, Pose, RigidActorHandle};
use actorsim_render::{RenderBody, RenderBodyKey, RenderScene, SharedRenderScene};
use slotmap::new_key_type;

use crate::clock::SceneClock;
use crate::error::{ActorError, EmitError, ListenerResult};
use crate::event::{EventEmitter, ListenerToken};
use crate::events::{
    ContactDetail, ContactEvent, ContactListener, StepEvent, StepListener, TriggerDetail,
    TriggerEvent, TriggerListener,
};
use crate::shape::CollisionShape;

new_key_type! {
    /// Identifier of an actor, unique within its scene
    pub struct ActorId;

    /// Identifier of a drive in the scene's drive registry
    pub struct DriveKey;
}

/// Kind of physics body behind an actor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorType {
    Static,
    Kinematic,
    Dynamic,
}

impl From<BodyType> for ActorType {
    fn from(body_type: BodyType) -> Self {
        match body_type {
            BodyType::Static => ActorType::Static,
            BodyType::Kinematic => ActorType::Kinematic,
            BodyType::Dynamic => ActorType::Dynamic,
        }
    }
}

/// A physics-bound entity and its presentation
///
/// Visibility follows one rule: visual bodies show at
/// `display_visibility` unless collision rendering is on, debug bodies show
/// at `display_visibility` only while it is on. [`Actor::hide_visual`]
/// overrides both until [`Actor::unhide_visual`].
pub struct Actor<H> {
    id: ActorId,
    name: String,
    scene: Weak<SceneClock>,
    handle: H,
    render: Weak<RefCell<RenderScene>>,
    visual_bodies: Vec<RenderBodyKey>,
    collision_bodies: Vec<RenderBodyKey>,
    shapes: Vec<CollisionShape>,
    drives: Vec<DriveKey>,
    display_visibility: f32,
    render_collision: bool,
    hidden: bool,
    step_events: EventEmitter<StepEvent>,
    contact_events: EventEmitter<ContactEvent>,
    trigger_events: EventEmitter<TriggerEvent>,
}

impl<H: RigidActorHandle> Actor<H> {
    /// Create an actor with no render bodies, fully visible
    pub fn new(id: ActorId, scene: &Rc<SceneClock>, handle: H, render: &SharedRenderScene) -> Self {
        Self {
            id,
            name: String::new(),
            scene: Rc::downgrade(scene),
            handle,
            render: Rc::downgrade(render),
            visual_bodies: Vec::new(),
            collision_bodies: Vec::new(),
            shapes: Vec::new(),
            drives: Vec::new(),
            display_visibility: 1.0,
            render_collision: false,
            hidden: false,
            step_events: EventEmitter::new(),
            contact_events: EventEmitter::new(),
            trigger_events: EventEmitter::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Bind the visual bodies; they stay fixed for the actor's lifetime
    pub fn with_visual_bodies(mut self, bodies: Vec<RenderBodyKey>) -> Self {
        self.visual_bodies = bodies;
        self.push_visibility();
        self
    }

    /// Bind the collision-debug bodies; they stay fixed for the actor's lifetime
    pub fn with_collision_bodies(mut self, bodies: Vec<RenderBodyKey>) -> Self {
        self.collision_bodies = bodies;
        self.push_visibility();
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn actor_type(&self) -> ActorType {
        self.handle.body_type().into()
    }

    /// The physics body behind this actor
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Current world pose, read from the physics body
    pub fn pose(&self) -> Pose {
        self.handle.global_pose()
    }

    pub fn visual_bodies(&self) -> &[RenderBodyKey] {
        &self.visual_bodies
    }

    pub fn collision_bodies(&self) -> &[RenderBodyKey] {
        &self.collision_bodies
    }

    // --- Visibility ---

    /// Set the display intensity and push it to every body
    ///
    /// Values outside `[0, 1]` are clamped. Non-finite values are ignored.
    pub fn set_display_visibility(&mut self, level: f32) {
        if !level.is_finite() {
            log::warn!("actor {:?}: ignoring non-finite visibility {}", self.id, level);
            return;
        }
        let clamped = level.clamp(0.0, 1.0);
        if clamped != level {
            log::warn!("actor {:?}: visibility {} clamped to {}", self.id, level, clamped);
        }
        self.display_visibility = clamped;
        self.push_visibility();
    }

    pub fn display_visibility(&self) -> f32 {
        self.display_visibility
    }

    /// Switch between showing visual bodies and collision-debug bodies
    pub fn render_collision_bodies(&mut self, enabled: bool) {
        self.render_collision = enabled;
        self.push_visibility();
    }

    pub fn is_rendering_collision(&self) -> bool {
        self.render_collision
    }

    /// Force every visual and debug body invisible
    ///
    /// Intensities set while hidden are still stored and pushed; they show
    /// once the actor is unhidden.
    pub fn hide_visual(&mut self) {
        self.hidden = true;
        self.for_each_body(|body| body.set_visible(false));
    }

    /// Lift the hide override on every body and restore the visibility rule
    pub fn unhide_visual(&mut self) {
        self.hidden = false;
        self.for_each_body(|body| body.set_visible(true));
        self.push_visibility();
    }

    pub fn is_hiding_visual(&self) -> bool {
        self.hidden
    }

    fn push_visibility(&self) {
        let (visual, collision) = if self.render_collision {
            (0.0, self.display_visibility)
        } else {
            (self.display_visibility, 0.0)
        };
        self.with_render(|render| {
            render.for_each_mut(&self.visual_bodies, |body| body.set_visibility(visual));
            render.for_each_mut(&self.collision_bodies, |body| body.set_visibility(collision));
        });
    }

    fn for_each_body(&self, mut f: impl FnMut(&mut dyn RenderBody)) {
        self.with_render(|render| {
            render.for_each_mut(&self.visual_bodies, &mut f);
            render.for_each_mut(&self.collision_bodies, &mut f);
        });
    }

    fn with_render(&self, f: impl FnOnce(&mut RenderScene)) {
        match self.render.upgrade() {
            Some(render) => f(&mut render.borrow_mut()),
            None => log::warn!("actor {:?}: render scene released; skipping body update", self.id),
        }
    }

    // --- Simulation hooks ---

    /// Publish this tick's step event with the scene's current timestep
    ///
    /// # Panics
    ///
    /// Panics if the scene that created this actor has been dropped.
    pub fn prestep(&mut self) -> Result<(), EmitError> {
        let Some(clock) = self.scene.upgrade() else {
            panic!("actor {:?} outlived the scene that steps it", self.id);
        };
        let mut event = StepEvent {
            actor: self.id,
            time: clock.timestep(),
        };
        self.step_events.emit(&mut event)
    }

    /// Push one world pose into every visual and debug body
    pub fn update_render(&self, pose: &Pose) {
        self.for_each_body(|body| body.update(pose));
    }

    /// Push the current physics pose into every body
    pub fn sync_render(&self) {
        let pose = self.pose();
        self.update_render(&pose);
    }

    /// Deliver a contact involving this actor to its contact listeners
    pub fn emit_contact(&mut self, mut event: ContactEvent) -> Result<(), EmitError> {
        self.contact_events.emit(&mut event)
    }

    /// Deliver a trigger overlap change to this actor's trigger listeners
    pub fn emit_trigger(&mut self, mut event: TriggerEvent) -> Result<(), EmitError> {
        self.trigger_events.emit(&mut event)
    }

    // --- Listeners ---

    /// Call `callback(actor, timestep)` on every step
    pub fn on_step(&mut self, mut callback: impl FnMut(ActorId, f32) -> ListenerResult + 'static) -> ListenerToken {
        self.step_events.subscribe(move |event: &mut StepEvent| callback(event.actor, event.time))
    }

    /// Call `callback(self_actor, other_actor, detail)` on every contact change
    pub fn on_contact(
        &mut self,
        mut callback: impl FnMut(ActorId, ActorId, &ContactDetail) -> ListenerResult + 'static,
    ) -> ListenerToken {
        self.contact_events.subscribe(move |event: &mut ContactEvent| {
            callback(event.self_actor, event.other_actor, &event.contact)
        })
    }

    /// Call `callback(trigger_actor, other_actor, detail)` on every trigger change
    pub fn on_trigger(
        &mut self,
        mut callback: impl FnMut(ActorId, ActorId, &TriggerDetail) -> ListenerResult + 'static,
    ) -> ListenerToken {
        self.trigger_events.subscribe(move |event: &mut TriggerEvent| {
            callback(event.trigger_actor, event.other_actor, &event.trigger)
        })
    }

    pub fn add_step_listener(&mut self, mut listener: impl StepListener + 'static) -> ListenerToken {
        self.on_step(move |actor, time| listener.on_step(actor, time))
    }

    pub fn add_contact_listener(&mut self, mut listener: impl ContactListener + 'static) -> ListenerToken {
        self.on_contact(move |actor, other, detail| listener.on_contact(actor, other, detail))
    }

    pub fn add_trigger_listener(&mut self, mut listener: impl TriggerListener + 'static) -> ListenerToken {
        self.on_trigger(move |actor, other, detail| listener.on_trigger(actor, other, detail))
    }

    /// Unregister a step, contact or trigger listener
    ///
    /// Returns false if the token belongs to none of this actor's emitters.
    pub fn remove_listener(&mut self, token: ListenerToken) -> bool {
        self.step_events.unsubscribe(token)
            || self.contact_events.unsubscribe(token)
            || self.trigger_events.unsubscribe(token)
    }

    // --- Drives ---

    /// Record a drive acting on this actor; the same drive may be added twice
    pub fn add_drive(&mut self, drive: DriveKey) {
        log::debug!("actor {:?}: add drive {:?}", self.id, drive);
        self.drives.push(drive);
    }

    /// Forget one occurrence of a drive; returns false if it was not present
    pub fn remove_drive(&mut self, drive: DriveKey) -> bool {
        match self.drives.iter().position(|&d| d == drive) {
            Some(index) => {
                self.drives.remove(index);
                log::debug!("actor {:?}: remove drive {:?}", self.id, drive);
                true
            }
            None => false,
        }
    }

    pub fn drives(&self) -> &[DriveKey] {
        &self.drives
    }

    // --- Shapes ---

    /// Take ownership of a shape and bind its geometry to the physics body
    ///
    /// Returns the shape's index in [`Actor::collision_shapes`]. If the
    /// physics body rejects the geometry the shape is dropped and nothing
    /// changes.
    pub fn attach_shape(&mut self, mut shape: CollisionShape) -> Result<usize, ActorError> {
        self.handle
            .attach_shape(shape.desc())
            .map_err(ActorError::ShapeRejected)?;
        let index = self.shapes.len();
        log::debug!("actor {:?}: attached shape #{} ({:?})", self.id, index, shape.geometry());
        shape.set_actor(self.id);
        self.shapes.push(shape);
        Ok(index)
    }

    /// Owned shapes in attachment order
    pub fn collision_shapes(&self) -> &[CollisionShape] {
        &self.shapes
    }
}

/// Object-safe view of an actor of any body type, as a scene stores it
pub trait SceneActor: Any {
    fn id(&self) -> ActorId;
    fn name(&self) -> &str;
    fn actor_type(&self) -> ActorType;
    fn pose(&self) -> Pose;
    fn prestep(&mut self) -> Result<(), EmitError>;
    fn sync_render(&self);
    fn emit_contact(&mut self, event: ContactEvent) -> Result<(), EmitError>;
    fn emit_trigger(&mut self, event: TriggerEvent) -> Result<(), EmitError>;
    fn set_display_visibility(&mut self, level: f32);
    fn render_collision_bodies(&mut self, enabled: bool);
    fn add_drive(&mut self, drive: DriveKey);
    fn remove_drive(&mut self, drive: DriveKey) -> bool;
    fn drives(&self) -> &[DriveKey];
    fn attach_shape(&mut self, shape: CollisionShape) -> Result<usize, ActorError>;
    fn collision_shapes(&self) -> &[CollisionShape];
    fn visual_bodies(&self) -> &[RenderBodyKey];
    fn collision_bodies(&self) -> &[RenderBodyKey];
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<H: RigidActorHandle + 'static> SceneActor for Actor<H> {
    fn id(&self) -> ActorId {
        Actor::id(self)
    }

    fn name(&self) -> &str {
        Actor::name(self)
    }

    fn actor_type(&self) -> ActorType {
        Actor::actor_type(self)
    }

    fn pose(&self) -> Pose {
        Actor::pose(self)
    }

    fn prestep(&mut self) -> Result<(), EmitError> {
        Actor::prestep(self)
    }

    fn sync_render(&self) {
        Actor::sync_render(self)
    }

    fn emit_contact(&mut self, event: ContactEvent) -> Result<(), EmitError> {
        Actor::emit_contact(self, event)
    }

    fn emit_trigger(&mut self, event: TriggerEvent) -> Result<(), EmitError> {
        Actor::emit_trigger(self, event)
    }

    fn set_display_visibility(&mut self, level: f32) {
        Actor::set_display_visibility(self, level)
    }

    fn render_collision_bodies(&mut self, enabled: bool) {
        Actor::render_collision_bodies(self, enabled)
    }

    fn add_drive(&mut self, drive: DriveKey) {
        Actor::add_drive(self, drive)
    }

    fn remove_drive(&mut self, drive: DriveKey) -> bool {
        Actor::remove_drive(self, drive)
    }

    fn drives(&self) -> &[DriveKey] {
        Actor::drives(self)
    }

    fn attach_shape(&mut self, shape: CollisionShape) -> Result<usize, ActorError> {
        Actor::attach_shape(self, shape)
    }

    fn collision_shapes(&self) -> &[CollisionShape] {
        Actor::collision_shapes(self)
    }

    fn visual_bodies(&self) -> &[RenderBodyKey] {
        Actor::visual_bodies(self)
    }

    fn collision_bodies(&self) -> &[RenderBodyKey] {
        Actor::collision_bodies(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
