//! ActorBuilder - declarative actor construction
//!
//! Collects collision shapes and visual bodies, then creates the physics
//! body, render bodies and actor inside a [`Scene`] in one call.

use actorsim_core::{ActorId, CollisionShape};
use actorsim_physics::{Pose, RigidBody, Vec3};
use actorsim_render::SceneBody;

use crate::scene::{ActorDesc, Scene, SceneError};

/// Builder for one actor
///
/// Every collision shape gets a matching collision-debug body, so switching
/// the actor to collision rendering shows its raw geometry.
///
/// # Example
/// ```ignore
/// let ball = ActorBuilder::new("ball")
///     .with_pose(Pose::from_position(Vec3::new(0.0, 0.0, 2.0)))
///     .add_shape(CollisionShape::sphere(0.5))
///     .add_visual(SceneBody::visual("ball-mesh"))
///     .with_mass(2.0)
///     .build_dynamic(&mut scene)?;
/// ```
pub struct ActorBuilder {
    name: String,
    pose: Pose,
    shapes: Vec<CollisionShape>,
    visuals: Vec<SceneBody>,
    mass: Option<f32>,
    inertia: Option<Vec3>,
    cmass_local_pose: Option<Pose>,
    velocity: Vec3,
    damping: Option<(f32, f32)>,
    gravity: bool,
}

impl ActorBuilder {
    /// Create a builder for an actor with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose: Pose::IDENTITY,
            shapes: Vec::new(),
            visuals: Vec::new(),
            mass: None,
            inertia: None,
            cmass_local_pose: None,
            velocity: Vec3::ZERO,
            damping: None,
            gravity: true,
        }
    }

    /// Set the initial world pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Add a collision shape (attached in the order added)
    pub fn add_shape(mut self, shape: CollisionShape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Add a visual body
    pub fn add_visual(mut self, body: SceneBody) -> Self {
        self.visuals.push(body);
        self
    }

    /// Mass of a dynamic actor (default 1.0)
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Diagonal inertia of a dynamic actor in its mass frame
    pub fn with_inertia(mut self, inertia: Vec3) -> Self {
        self.inertia = Some(inertia);
        self
    }

    pub fn with_cmass_local_pose(mut self, pose: Pose) -> Self {
        self.cmass_local_pose = Some(pose);
        self
    }

    /// Initial linear velocity of a dynamic or kinematic actor
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.damping = Some((linear, angular));
        self
    }

    /// Whether a dynamic actor falls under gravity (default true)
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity = enabled;
        self
    }

    /// Build an actor that never moves
    pub fn build_static(self, scene: &mut Scene) -> Result<ActorId, SceneError> {
        let body = RigidBody::new_static(self.pose);
        self.build(scene, body)
    }

    /// Build an actor moved by kinematic targets
    pub fn build_kinematic(self, scene: &mut Scene) -> Result<ActorId, SceneError> {
        let body = RigidBody::new_kinematic(self.pose).with_velocity(self.velocity);
        self.build(scene, body)
    }

    /// Build a simulated actor
    pub fn build_dynamic(self, scene: &mut Scene) -> Result<ActorId, SceneError> {
        let mut body = RigidBody::new_dynamic(self.pose)
            .with_velocity(self.velocity)
            .with_gravity(self.gravity);
        if let Some(mass) = self.mass {
            body = body.with_mass(mass);
        }
        if let Some(inertia) = self.inertia {
            body = body.with_inertia(inertia);
        }
        if let Some(pose) = self.cmass_local_pose {
            body = body.with_cmass_local_pose(pose);
        }
        if let Some((linear, angular)) = self.damping {
            body = body.with_damping(linear, angular);
        }
        self.build(scene, body)
    }

    fn build(self, scene: &mut Scene, body: RigidBody) -> Result<ActorId, SceneError> {
        let mut desc = ActorDesc::new(self.name.clone());
        {
            let mut render = scene.render().borrow_mut();
            for visual in self.visuals {
                desc.visual_bodies.push(render.add_body(visual));
            }
            for index in 0..self.shapes.len() {
                let debug = SceneBody::collision(format!("{}/collision{}", self.name, index));
                desc.collision_bodies.push(render.add_body(debug));
            }
        }

        let id = scene.create_actor(body, desc)?;
        for shape in self.shapes {
            if let Err(err) = scene.attach_shape(id, shape) {
                log::warn!("building actor '{}' failed: {}", self.name, err);
                scene.remove_actor(id)?;
                return Err(err);
            }
        }
        Ok(id)
    }
}
