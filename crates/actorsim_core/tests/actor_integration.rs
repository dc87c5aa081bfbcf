//! Integration tests: actors bound to bodies in a real physics world

use std::cell::RefCell;
use std::rc::Rc;

use actorsim_core::{
    Actor, ActorError, ActorId, ActorType, CollisionShape, DynamicActor, KinematicActor, SceneClock,
    StaticActor,
};
use actorsim_physics::{
    DynamicBodyHandle, KinematicBodyHandle, PhysicsConfig, PhysicsError, PhysicsWorld, Pose,
    RigidBody, SharedWorld, StaticBodyHandle, Vec3,
};
use actorsim_render::{RenderScene, SceneBody, SharedRenderScene};
use slotmap::SlotMap;

const DT: f32 = 0.01;

struct Harness {
    clock: Rc<SceneClock>,
    world: SharedWorld,
    render: SharedRenderScene,
    ids: SlotMap<ActorId, ()>,
}

impl Harness {
    fn new(gravity: Vec3) -> Self {
        Self {
            clock: SceneClock::new(DT),
            world: Rc::new(RefCell::new(PhysicsWorld::with_config(PhysicsConfig::new(gravity)))),
            render: RenderScene::shared(),
            ids: SlotMap::with_key(),
        }
    }

    fn dynamic(&mut self, body: RigidBody) -> DynamicActor {
        let key = self.world.borrow_mut().add_body(body);
        let handle = DynamicBodyHandle::new(&self.world, key).unwrap();
        Actor::new(self.ids.insert(()), &self.clock, handle, &self.render)
    }

    fn step(&self) {
        self.world.borrow_mut().step(self.clock.timestep());
        self.clock.advance();
    }
}

#[test]
fn test_force_produces_acceleration_f_over_m() {
    let mut h = Harness::new(Vec3::ZERO);
    let actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY).with_mass(2.0));

    let before = actor.velocity();
    actor.add_force_torque(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    h.step();
    let delta = actor.velocity() - before;

    // a = F / m = 5 along +Z, over one step
    let acceleration = delta / DT;
    assert!((acceleration - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-3);
    assert_eq!(actor.angular_velocity(), Vec3::ZERO);
}

#[test]
fn test_force_is_cleared_after_step() {
    let mut h = Harness::new(Vec3::ZERO);
    let actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY));

    actor.add_force_torque(Vec3::X, Vec3::ZERO);
    h.step();
    let after_first = actor.velocity();
    h.step();

    assert_eq!(actor.velocity(), after_first);
}

#[test]
fn test_off_center_force_spins_body() {
    let mut h = Harness::new(Vec3::ZERO);
    let actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY));

    actor.add_force_at_point(Vec3::Y, Vec3::X);
    h.step();

    assert!(actor.velocity().y > 0.0);
    assert!(actor.angular_velocity().z > 0.0);
}

#[test]
fn test_damping_slows_body() {
    let mut h = Harness::new(Vec3::ZERO);
    let actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY).with_velocity(Vec3::X));

    actor.set_damping(10.0, 0.0);
    h.step();

    let expected = 1.0 / (1.0 + 10.0 * DT);
    assert!((actor.velocity().x - expected).abs() < 1e-5);
}

#[test]
fn test_inertial_queries_match_body() {
    let mut h = Harness::new(Vec3::ZERO);
    let cmass = Pose::from_position(Vec3::new(0.0, 0.0, 0.5));
    let actor = h.dynamic(
        RigidBody::new_dynamic(Pose::IDENTITY)
            .with_mass(4.0)
            .with_inertia(Vec3::new(1.0, 2.0, 3.0))
            .with_cmass_local_pose(cmass),
    );

    assert_eq!(actor.actor_type(), ActorType::Dynamic);
    assert_eq!(actor.mass(), 4.0);
    assert_eq!(actor.inertia(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(actor.cmass_local_pose(), cmass);
}

#[test]
fn test_render_follows_physics_pose() {
    let mut h = Harness::new(Vec3::ZERO);
    let visual = h.render.borrow_mut().add_body(SceneBody::visual("ball"));
    let actor = h
        .dynamic(RigidBody::new_dynamic(Pose::IDENTITY).with_velocity(Vec3::new(0.0, 0.0, 1.0)))
        .with_visual_bodies(vec![visual]);

    h.step();
    actor.sync_render();

    let render = h.render.borrow();
    let body = render.get_as::<SceneBody>(visual).unwrap();
    assert_eq!(body.pose(), actor.pose());
    assert!((body.pose().p.z - DT).abs() < 1e-6);
}

#[test]
fn test_plane_rejected_on_dynamic_actor() {
    let mut h = Harness::new(Vec3::ZERO);
    let mut actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY));

    let err = actor.attach_shape(CollisionShape::plane(Vec3::Z)).unwrap_err();

    assert!(matches!(err, ActorError::ShapeRejected(PhysicsError::PlaneOnMovingBody)));
    assert!(actor.collision_shapes().is_empty());
}

#[test]
fn test_plane_accepted_on_static_actor() {
    let mut h = Harness::new(Vec3::ZERO);
    let key = h.world.borrow_mut().add_body(RigidBody::new_static(Pose::IDENTITY));
    let handle = StaticBodyHandle::new(&h.world, key).unwrap();
    let mut ground: StaticActor = Actor::new(h.ids.insert(()), &h.clock, handle, &h.render);

    assert_eq!(ground.attach_shape(CollisionShape::plane(Vec3::Z)).unwrap(), 0);
    assert_eq!(h.world.borrow().get_body(key).unwrap().shapes().len(), 1);
    assert_eq!(ground.actor_type(), ActorType::Static);
}

#[test]
fn test_kinematic_actor_moves_to_target() {
    let mut h = Harness::new(Vec3::ZERO);
    let key = h.world.borrow_mut().add_body(RigidBody::new_kinematic(Pose::IDENTITY));
    let handle = KinematicBodyHandle::new(&h.world, key).unwrap();
    let platform: KinematicActor = Actor::new(h.ids.insert(()), &h.clock, handle, &h.render);

    let target = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
    platform.set_kinematic_target(target);
    h.step();
    assert_eq!(platform.pose(), target);

    h.step();
    h.step();
    assert_eq!(platform.pose(), target);
}

#[test]
fn test_step_events_report_current_timestep() {
    let mut h = Harness::new(Vec3::ZERO);
    let mut actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY));
    let times = Rc::new(RefCell::new(Vec::new()));
    let times_clone = Rc::clone(&times);
    actor.on_step(move |_, time| {
        times_clone.borrow_mut().push(time);
        Ok(())
    });

    actor.prestep().unwrap();
    h.clock.set_timestep(0.02);
    actor.prestep().unwrap();

    assert_eq!(*times.borrow(), vec![DT, 0.02]);
}

#[test]
#[should_panic(expected = "physics world released")]
fn test_query_after_world_dropped_panics() {
    let mut h = Harness::new(Vec3::ZERO);
    let actor = h.dynamic(RigidBody::new_dynamic(Pose::IDENTITY));
    let Harness { world, .. } = h;
    drop(world);
    let _ = actor.velocity();
}
