//! Operations for actors whose body has mass and inertia
//!
//! These exist only on `Actor<H>` where `H` is a dynamic body handle, so
//! asking a static actor for its velocity does not compile. Each call is a
//! straight delegation to the physics body; nothing is cached here.

use actorsim_physics::{KinematicBodyHandle, Pose, RigidDynamicHandle, Vec3};

use crate::actor::Actor;

impl<H: RigidDynamicHandle> Actor<H> {
    /// Linear velocity of the center of mass, world frame
    pub fn velocity(&self) -> Vec3 {
        self.handle().linear_velocity()
    }

    /// Angular velocity, world frame
    pub fn angular_velocity(&self) -> Vec3 {
        self.handle().angular_velocity()
    }

    pub fn set_velocity(&self, velocity: Vec3) {
        self.handle().set_linear_velocity(velocity);
    }

    pub fn set_angular_velocity(&self, velocity: Vec3) {
        self.handle().set_angular_velocity(velocity);
    }

    /// Apply a force at a world-space point for the next step
    ///
    /// A point away from the center of mass also produces a torque.
    pub fn add_force_at_point(&self, force: Vec3, point: Vec3) {
        self.handle().add_force_at_pos(force, point);
    }

    /// Apply a force at the center of mass and an independent torque
    pub fn add_force_torque(&self, force: Vec3, torque: Vec3) {
        self.handle().add_force(force);
        self.handle().add_torque(torque);
    }

    /// Set velocity damping applied on every following step
    pub fn set_damping(&self, linear: f32, angular: f32) {
        self.handle().set_linear_damping(linear);
        self.handle().set_angular_damping(angular);
    }

    pub fn mass(&self) -> f32 {
        self.handle().mass()
    }

    /// Diagonal inertia tensor in the mass frame
    pub fn inertia(&self) -> Vec3 {
        self.handle().mass_space_inertia()
    }

    /// Center-of-mass frame relative to the actor frame
    pub fn cmass_local_pose(&self) -> Pose {
        self.handle().cmass_local_pose()
    }
}

impl Actor<KinematicBodyHandle> {
    /// Pose the body moves to during the next step
    pub fn set_kinematic_target(&self, target: Pose) {
        self.handle().set_kinematic_target(target);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use actorsim_physics::{BodyType, PhysicsResult, RigidActorHandle, ShapeDesc};
    use actorsim_render::RenderScene;
    use slotmap::SlotMap;

    use super::*;
    use crate::actor::ActorId;
    use crate::clock::SceneClock;

    /// Records the calls a dynamic actor makes on its body
    #[derive(Default)]
    struct RecordingBody {
        velocity: Cell<Vec3>,
        forces: RefCell<Vec<Vec3>>,
        torques: RefCell<Vec<Vec3>>,
        damping: Cell<(f32, f32)>,
    }

    impl RigidActorHandle for RecordingBody {
        fn global_pose(&self) -> Pose {
            Pose::IDENTITY
        }

        fn attach_shape(&self, _shape: &ShapeDesc) -> PhysicsResult<()> {
            Ok(())
        }

        fn body_type(&self) -> BodyType {
            BodyType::Dynamic
        }
    }

    impl RigidDynamicHandle for RecordingBody {
        fn linear_velocity(&self) -> Vec3 {
            self.velocity.get()
        }

        fn angular_velocity(&self) -> Vec3 {
            Vec3::ZERO
        }

        fn set_linear_velocity(&self, velocity: Vec3) {
            self.velocity.set(velocity);
        }

        fn set_angular_velocity(&self, _velocity: Vec3) {}

        fn add_force(&self, force: Vec3) {
            self.forces.borrow_mut().push(force);
        }

        fn add_torque(&self, torque: Vec3) {
            self.torques.borrow_mut().push(torque);
        }

        fn set_linear_damping(&self, damping: f32) {
            self.damping.set((damping, self.damping.get().1));
        }

        fn set_angular_damping(&self, damping: f32) {
            self.damping.set((self.damping.get().0, damping));
        }

        fn mass(&self) -> f32 {
            2.0
        }

        fn mass_space_inertia(&self) -> Vec3 {
            Vec3::new(1.0, 2.0, 3.0)
        }

        fn cmass_local_pose(&self) -> Pose {
            Pose::from_position(Vec3::Z)
        }
    }

    fn actor() -> (Rc<SceneClock>, Actor<RecordingBody>) {
        let clock = SceneClock::new(0.01);
        let render = RenderScene::shared();
        let id = SlotMap::<ActorId, ()>::with_key().insert(());
        let actor = Actor::new(id, &clock, RecordingBody::default(), &render);
        (clock, actor)
    }

    #[test]
    fn test_force_torque_reach_body() {
        let (_clock, actor) = actor();
        actor.add_force_torque(Vec3::new(0.0, 0.0, 10.0), Vec3::X);

        assert_eq!(*actor.handle().forces.borrow(), vec![Vec3::new(0.0, 0.0, 10.0)]);
        assert_eq!(*actor.handle().torques.borrow(), vec![Vec3::X]);
    }

    #[test]
    fn test_force_at_point_adds_lever_torque() {
        let (_clock, actor) = actor();
        // Center of mass sits at (0, 0, 1); push +X one unit above it
        actor.add_force_at_point(Vec3::X, Vec3::new(0.0, 0.0, 2.0));

        assert_eq!(*actor.handle().forces.borrow(), vec![Vec3::X]);
        assert_eq!(*actor.handle().torques.borrow(), vec![Vec3::Y]);
    }

    #[test]
    fn test_queries_delegate() {
        let (_clock, actor) = actor();
        actor.set_velocity(Vec3::new(1.0, 0.0, 0.0));
        actor.set_damping(0.5, 0.25);

        assert_eq!(actor.velocity(), Vec3::X);
        assert_eq!(actor.handle().damping.get(), (0.5, 0.25));
        assert_eq!(actor.mass(), 2.0);
        assert_eq!(actor.inertia(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(actor.cmass_local_pose().p, Vec3::Z);
    }
}
