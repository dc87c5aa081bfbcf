//! Scene: owner and driver of actors
//!
//! A scene owns the physics world, the render registry, the drive registry
//! and every actor. Each [`Scene::step`]:
//! 1. runs every actor's prestep hook (step events)
//! 2. steps the physics world by the scene timestep
//! 3. forwards contact and trigger reports to the actors involved
//!
//! [`Scene::update_render`] is separate and should follow `step`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use actorsim_core::{
    Actor, ActorError, ActorId, ActorType, CollisionShape, ContactDetail, ContactEvent, DriveKey,
    EmitError, SceneActor, SceneClock, TriggerDetail, TriggerEvent,
};
use actorsim_physics::{
    BodyKey, BodyType, ContactReport, DynamicBodyHandle, KinematicBodyHandle, PhysicsConfig,
    PhysicsError, PhysicsWorld, RigidActorHandle, RigidBody, SharedWorld, StaticBodyHandle, StepReport,
    TriggerReport,
};
use actorsim_render::{RenderBodyKey, RenderScene, SharedRenderScene};
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use crate::config::{AppConfig, DisplayConfig};

/// Errors raised by scene operations
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("no actor with id {0:?} in this scene")]
    UnknownActor(ActorId),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error(transparent)]
    Actor(#[from] ActorError),
    /// Listener failures from every emission of one step, with the
    /// report of the physics step that still ran
    #[error("{} event emission(s) had failing listeners", .failures.len())]
    Emit {
        failures: Vec<EmitError>,
        report: StepReport,
    },
}

/// An actuator acting on one actor, or between two
///
/// Actors only track which drives touch them; the scene owns the drive.
#[derive(Clone, Debug, PartialEq)]
pub struct Drive {
    pub name: String,
    pub actor: ActorId,
    pub other: Option<ActorId>,
}

impl Drive {
    fn actors(&self) -> impl Iterator<Item = ActorId> {
        std::iter::once(self.actor).chain(self.other)
    }
}

/// Name and render bodies of an actor about to be created
#[derive(Clone, Debug, Default)]
pub struct ActorDesc {
    pub name: String,
    pub visual_bodies: Vec<RenderBodyKey>,
    pub collision_bodies: Vec<RenderBodyKey>,
}

impl ActorDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A simulated scene
pub struct Scene {
    clock: Rc<SceneClock>,
    physics: SharedWorld,
    render: SharedRenderScene,
    actors: SlotMap<ActorId, Box<dyn SceneActor>>,
    actor_bodies: SecondaryMap<ActorId, BodyKey>,
    body_actors: HashMap<BodyKey, ActorId>,
    drives: SlotMap<DriveKey, Drive>,
    display: DisplayConfig,
}

impl Scene {
    /// Create an empty scene stepping by `timestep` seconds
    pub fn new(timestep: f32, physics: PhysicsConfig) -> Self {
        Self {
            clock: SceneClock::new(timestep),
            physics: Rc::new(RefCell::new(PhysicsWorld::with_config(physics))),
            render: RenderScene::shared(),
            actors: SlotMap::with_key(),
            actor_bodies: SecondaryMap::new(),
            body_actors: HashMap::new(),
            drives: SlotMap::with_key(),
            display: DisplayConfig::default(),
        }
    }

    /// Create a scene from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mut scene = Self::new(config.simulation.timestep, config.physics.to_physics_config());
        scene.display = config.display.clone();
        scene
    }

    pub fn timestep(&self) -> f32 {
        self.clock.timestep()
    }

    pub fn set_timestep(&self, timestep: f32) {
        self.clock.set_timestep(timestep);
    }

    /// Total simulated time in seconds
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn physics(&self) -> &SharedWorld {
        &self.physics
    }

    pub fn render(&self) -> &SharedRenderScene {
        &self.render
    }

    // --- Actors ---

    /// Add `body` to the physics world and bind a new actor to it
    ///
    /// The actor variant follows the body type. New actors start with the
    /// scene's configured display settings.
    pub fn create_actor(&mut self, body: RigidBody, desc: ActorDesc) -> Result<ActorId, SceneError> {
        let body_type = body.body_type;
        let key = self.physics.borrow_mut().add_body(body);
        let created = match body_type {
            BodyType::Static => {
                StaticBodyHandle::new(&self.physics, key).map(|h| self.insert_actor(key, h, desc))
            }
            BodyType::Kinematic => {
                KinematicBodyHandle::new(&self.physics, key).map(|h| self.insert_actor(key, h, desc))
            }
            BodyType::Dynamic => {
                DynamicBodyHandle::new(&self.physics, key).map(|h| self.insert_actor(key, h, desc))
            }
        };
        match created {
            Ok(id) => Ok(id),
            Err(err) => {
                self.physics.borrow_mut().remove_body(key);
                Err(err.into())
            }
        }
    }

    fn insert_actor<H>(&mut self, key: BodyKey, handle: H, desc: ActorDesc) -> ActorId
    where
        H: RigidActorHandle + 'static,
    {
        let clock = Rc::clone(&self.clock);
        let render = Rc::clone(&self.render);
        let display = self.display.clone();
        let id = self.actors.insert_with_key(|id| {
            let mut actor = Actor::new(id, &clock, handle, &render)
                .with_name(desc.name)
                .with_visual_bodies(desc.visual_bodies)
                .with_collision_bodies(desc.collision_bodies);
            actor.set_display_visibility(display.default_visibility);
            actor.render_collision_bodies(display.render_collision);
            Box::new(actor) as Box<dyn SceneActor>
        });
        self.actor_bodies.insert(id, key);
        self.body_actors.insert(key, id);
        log::debug!("created actor {:?} on body {:?}", id, key);
        id
    }

    /// Remove an actor with its physics body, render bodies and drives
    pub fn remove_actor(&mut self, id: ActorId) -> Result<(), SceneError> {
        let actor = self.actors.remove(id).ok_or(SceneError::UnknownActor(id))?;

        if let Some(key) = self.actor_bodies.remove(id) {
            self.body_actors.remove(&key);
            self.physics.borrow_mut().remove_body(key);
        }

        let mut render = self.render.borrow_mut();
        for &body in actor.visual_bodies().iter().chain(actor.collision_bodies()) {
            render.remove_body(body);
        }
        drop(render);

        let attached: Vec<DriveKey> = self
            .drives
            .iter()
            .filter(|(_, drive)| drive.actors().any(|a| a == id))
            .map(|(key, _)| key)
            .collect();
        for key in attached {
            self.remove_drive(key);
        }

        log::debug!("removed actor {:?} ({})", id, actor.name());
        Ok(())
    }

    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.keys()
    }

    /// The actor bound to a physics body
    pub fn actor_for_body(&self, key: BodyKey) -> Option<ActorId> {
        self.body_actors.get(&key).copied()
    }

    pub fn body_of(&self, id: ActorId) -> Option<BodyKey> {
        self.actor_bodies.get(id).copied()
    }

    pub fn get(&self, id: ActorId) -> Option<&dyn SceneActor> {
        self.actors.get(id).map(|a| a.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut dyn SceneActor> {
        match self.actors.get_mut(id) {
            Some(actor) => Some(actor.as_mut()),
            None => None,
        }
    }

    /// Get an actor as its concrete type, e.g. `scene.actor::<DynamicActor>(id)`
    pub fn actor<A: SceneActor>(&self, id: ActorId) -> Option<&A> {
        self.get(id).and_then(|a| a.as_any().downcast_ref::<A>())
    }

    pub fn actor_mut<A: SceneActor>(&mut self, id: ActorId) -> Option<&mut A> {
        self.get_mut(id).and_then(|a| a.as_any_mut().downcast_mut::<A>())
    }

    pub fn actor_type(&self, id: ActorId) -> Option<ActorType> {
        self.get(id).map(|a| a.actor_type())
    }

    /// Attach a collision shape to an actor
    pub fn attach_shape(&mut self, id: ActorId, shape: CollisionShape) -> Result<usize, SceneError> {
        let actor = self.get_mut(id).ok_or(SceneError::UnknownActor(id))?;
        Ok(actor.attach_shape(shape)?)
    }

    // --- Drives ---

    /// Register a drive on `actor`, optionally linking it to `other`
    pub fn create_drive(
        &mut self,
        name: impl Into<String>,
        actor: ActorId,
        other: Option<ActorId>,
    ) -> Result<DriveKey, SceneError> {
        let drive = Drive {
            name: name.into(),
            actor,
            other,
        };
        if let Some(missing) = drive.actors().find(|a| !self.actors.contains_key(*a)) {
            return Err(SceneError::UnknownActor(missing));
        }

        let actors: Vec<ActorId> = drive.actors().collect();
        let key = self.drives.insert(drive);
        for id in actors {
            if let Some(actor) = self.actors.get_mut(id) {
                actor.add_drive(key);
            }
        }
        Ok(key)
    }

    /// Remove a drive and detach it from its actors
    pub fn remove_drive(&mut self, key: DriveKey) -> Option<Drive> {
        let drive = self.drives.remove(key)?;
        for id in drive.actors() {
            if let Some(actor) = self.actors.get_mut(id) {
                actor.remove_drive(key);
            }
        }
        Some(drive)
    }

    pub fn drive(&self, key: DriveKey) -> Option<&Drive> {
        self.drives.get(key)
    }

    pub fn drive_count(&self) -> usize {
        self.drives.len()
    }

    // --- Display ---

    /// Apply one display visibility to every actor
    pub fn set_display_visibility(&mut self, level: f32) {
        for actor in self.actors.values_mut() {
            actor.set_display_visibility(level);
        }
    }

    /// Switch every actor between visual and collision-debug rendering
    pub fn render_collision_bodies(&mut self, enabled: bool) {
        for actor in self.actors.values_mut() {
            actor.render_collision_bodies(enabled);
        }
    }

    // --- Simulation ---

    /// Advance the scene by one timestep
    ///
    /// Every actor and listener runs even when some listeners fail; their
    /// failures are returned together with the physics report of the step.
    pub fn step(&mut self) -> Result<StepReport, SceneError> {
        let mut failures = Vec::new();

        for actor in self.actors.values_mut() {
            if let Err(err) = actor.prestep() {
                failures.push(err);
            }
        }

        let dt = self.clock.timestep();
        let report = self.physics.borrow_mut().step(dt);
        self.clock.advance();

        for contact in &report.contacts {
            self.forward_contact(contact, &mut failures);
        }
        for trigger in &report.triggers {
            self.forward_trigger(trigger, &mut failures);
        }

        log::trace!(
            "step {}: {} contact report(s), {} trigger report(s), {} failed emission(s)",
            self.clock.ticks(),
            report.contacts.len(),
            report.triggers.len(),
            failures.len()
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(SceneError::Emit { failures, report })
        }
    }

    fn forward_contact(&mut self, report: &ContactReport, failures: &mut Vec<EmitError>) {
        let pair = report.pair;
        let (Some(a), Some(b)) = (self.actor_for_body(pair.body_a), self.actor_for_body(pair.body_b)) else {
            log::trace!("contact between bodies without actors: {:?}", pair);
            return;
        };

        let to_a = ContactEvent {
            self_actor: a,
            other_actor: b,
            contact: ContactDetail {
                phase: report.phase,
                self_shape: pair.shape_a,
                other_shape: pair.shape_b,
                points: report.contacts.clone(),
                material: report.material,
            },
        };
        let to_b = ContactEvent {
            self_actor: b,
            other_actor: a,
            contact: ContactDetail {
                phase: report.phase,
                self_shape: pair.shape_b,
                other_shape: pair.shape_a,
                points: report.contacts.iter().map(|c| c.flipped()).collect(),
                material: report.material,
            },
        };

        for (id, event) in [(a, to_a), (b, to_b)] {
            if let Some(actor) = self.actors.get_mut(id) {
                if let Err(err) = actor.emit_contact(event) {
                    failures.push(err);
                }
            }
        }
    }

    fn forward_trigger(&mut self, report: &TriggerReport, failures: &mut Vec<EmitError>) {
        let (Some(trigger_actor), Some(other_actor)) =
            (self.actor_for_body(report.trigger_body), self.actor_for_body(report.other_body))
        else {
            log::trace!("trigger between bodies without actors: {:?}", report);
            return;
        };

        let event = TriggerEvent {
            trigger_actor,
            other_actor,
            trigger: TriggerDetail {
                phase: report.phase,
                trigger_shape: report.trigger_shape,
                other_shape: report.other_shape,
            },
        };
        for id in [trigger_actor, other_actor] {
            if let Some(actor) = self.actors.get_mut(id) {
                if let Err(err) = actor.emit_trigger(event) {
                    failures.push(err);
                }
            }
        }
    }

    /// Push every actor's physics pose into its render bodies
    pub fn update_render(&self) {
        for actor in self.actors.values() {
            actor.sync_render();
        }
    }
}
