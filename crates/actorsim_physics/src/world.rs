//! Physics world and simulation

use std::collections::HashSet;

use glam::{Quat, Vec3};
use slotmap::SlotMap;

use crate::body::{BodyKey, BodyType, RigidBody, ShapeDesc};
use crate::collision::{collide, Contact};
use crate::error::{PhysicsError, PhysicsResult};
use crate::material::PhysicsMaterial;
use crate::pose::Pose;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to dynamic bodies
    pub gravity: Vec3,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -9.81),
        }
    }
}

impl PhysicsConfig {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

/// Two shapes on two different bodies, ordered by body key
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapePair {
    pub body_a: BodyKey,
    pub shape_a: usize,
    pub body_b: BodyKey,
    pub shape_b: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    /// The shapes started touching this step
    Found,
    /// The shapes were touching last step and still are
    Persists,
    /// The shapes stopped touching this step
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    Entered,
    Left,
}

/// A touching shape pair reported by [`PhysicsWorld::step`]
#[derive(Clone, Debug, PartialEq)]
pub struct ContactReport {
    pub pair: ShapePair,
    pub phase: ContactPhase,
    /// Contact points with normals pointing from B toward A; empty when lost
    pub contacts: Vec<Contact>,
    /// Combined surface material of the two shapes
    pub material: PhysicsMaterial,
}

/// A trigger overlap change reported by [`PhysicsWorld::step`]
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerReport {
    pub trigger_body: BodyKey,
    pub trigger_shape: usize,
    pub other_body: BodyKey,
    pub other_shape: usize,
    pub phase: TriggerPhase,
}

/// Everything one step observed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub contacts: Vec<ContactReport>,
    pub triggers: Vec<TriggerReport>,
}

/// The physics world containing all rigid bodies
///
/// The world integrates forces and reports overlaps; it does not push
/// overlapping bodies apart.
pub struct PhysicsWorld {
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Contact pairs touching at the end of the last step
    touching: HashSet<ShapePair>,
    /// Trigger pairs (trigger shape first) overlapping at the end of the last step
    overlapping: HashSet<ShapePair>,
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            touching: HashSet::new(),
            overlapping: HashSet::new(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body and forget every pair it took part in
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        let removed = self.bodies.remove(key)?;
        self.touching.retain(|p| p.body_a != key && p.body_b != key);
        self.overlapping.retain(|p| p.body_a != key && p.body_b != key);
        Some(removed)
    }

    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    fn body_mut(&mut self, key: BodyKey) -> PhysicsResult<&mut RigidBody> {
        self.bodies.get_mut(key).ok_or(PhysicsError::StaleBody(key))
    }

    fn dynamic_body_mut(&mut self, key: BodyKey) -> PhysicsResult<&mut RigidBody> {
        let body = self.body_mut(key)?;
        if body.body_type != BodyType::Dynamic {
            return Err(PhysicsError::NotDynamic(key));
        }
        Ok(body)
    }

    /// Attach a shape to a body, returning its index on that body
    ///
    /// Rejects degenerate geometry, invalid local poses, and planes on
    /// non-static bodies.
    pub fn attach_shape(&mut self, key: BodyKey, shape: ShapeDesc) -> PhysicsResult<usize> {
        shape.geometry.validate()?;
        if !shape.local_pose.is_valid() {
            return Err(PhysicsError::InvalidLocalPose);
        }
        let body = self.body_mut(key)?;
        if shape.geometry.requires_static() && body.body_type != BodyType::Static {
            return Err(PhysicsError::PlaneOnMovingBody);
        }
        body.shapes.push(shape);
        Ok(body.shapes.len() - 1)
    }

    /// Accumulate a force at the center of mass for the next step
    pub fn add_force(&mut self, key: BodyKey, force: Vec3) -> PhysicsResult<()> {
        self.dynamic_body_mut(key)?.force += force;
        Ok(())
    }

    /// Accumulate a world-frame torque for the next step
    pub fn add_torque(&mut self, key: BodyKey, torque: Vec3) -> PhysicsResult<()> {
        self.dynamic_body_mut(key)?.torque += torque;
        Ok(())
    }

    pub fn set_damping(&mut self, key: BodyKey, linear: f32, angular: f32) -> PhysicsResult<()> {
        let body = self.dynamic_body_mut(key)?;
        body.linear_damping = linear.max(0.0);
        body.angular_damping = angular.max(0.0);
        Ok(())
    }

    /// Move a kinematic body to `target` during the next step
    pub fn set_kinematic_target(&mut self, key: BodyKey, target: Pose) -> PhysicsResult<()> {
        let body = self.body_mut(key)?;
        if body.body_type != BodyType::Kinematic {
            return Err(PhysicsError::NotKinematic(key));
        }
        body.kinematic_target = Some(target);
        Ok(())
    }

    /// Step the simulation forward by dt seconds
    ///
    /// 1. Integrate forces, gravity and damping into dynamic velocities
    /// 2. Integrate velocities into poses (kinematic bodies jump to their target)
    /// 3. Detect overlapping shape pairs and report contact/trigger changes
    pub fn step(&mut self, dt: f32) -> StepReport {
        let gravity = self.config.gravity;
        for (_key, body) in &mut self.bodies {
            match body.body_type {
                BodyType::Static => {}
                BodyType::Kinematic => integrate_kinematic(body, dt),
                BodyType::Dynamic => integrate_dynamic(body, gravity, dt),
            }
            body.force = Vec3::ZERO;
            body.torque = Vec3::ZERO;
        }

        self.detect_pairs()
    }

    fn detect_pairs(&mut self) -> StepReport {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();
        let mut touching = HashSet::new();
        let mut overlapping = HashSet::new();
        let mut report = StepReport::default();

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let (key_a, key_b) = (keys[i], keys[j]);
                let (body_a, body_b) = (&self.bodies[key_a], &self.bodies[key_b]);

                // Only pairs with at least one simulated body generate anything
                if !body_a.is_dynamic() && !body_b.is_dynamic() {
                    continue;
                }

                for (si, shape_a) in body_a.shapes.iter().enumerate() {
                    for (sj, shape_b) in body_b.shapes.iter().enumerate() {
                        if shape_a.is_trigger && shape_b.is_trigger {
                            continue;
                        }
                        if !shape_a.filter.collides_with(&shape_b.filter) {
                            continue;
                        }

                        let geom_a = shape_a.geometry.to_world(&body_a.pose.compose(&shape_a.local_pose));
                        let geom_b = shape_b.geometry.to_world(&body_b.pose.compose(&shape_b.local_pose));
                        let Some(contact) = collide(&geom_a, &geom_b) else {
                            continue;
                        };

                        if shape_a.is_trigger || shape_b.is_trigger {
                            let pair = if shape_a.is_trigger {
                                ShapePair { body_a: key_a, shape_a: si, body_b: key_b, shape_b: sj }
                            } else {
                                ShapePair { body_a: key_b, shape_a: sj, body_b: key_a, shape_b: si }
                            };
                            if !self.overlapping.contains(&pair) {
                                report.triggers.push(trigger_report(pair, TriggerPhase::Entered));
                            }
                            overlapping.insert(pair);
                        } else {
                            let pair = ShapePair { body_a: key_a, shape_a: si, body_b: key_b, shape_b: sj };
                            let phase = if self.touching.contains(&pair) {
                                ContactPhase::Persists
                            } else {
                                ContactPhase::Found
                            };
                            report.contacts.push(ContactReport {
                                pair,
                                phase,
                                contacts: vec![contact],
                                material: shape_a.material.combine(&shape_b.material),
                            });
                            touching.insert(pair);
                        }
                    }
                }
            }
        }

        let mut lost: Vec<ShapePair> = self.touching.difference(&touching).copied().collect();
        lost.sort_unstable();
        for pair in lost {
            report.contacts.push(ContactReport {
                pair,
                phase: ContactPhase::Lost,
                contacts: Vec::new(),
                material: self.pair_material(&pair),
            });
        }
        let mut left: Vec<ShapePair> = self.overlapping.difference(&overlapping).copied().collect();
        left.sort_unstable();
        for pair in left {
            report.triggers.push(trigger_report(pair, TriggerPhase::Left));
        }

        self.touching = touching;
        self.overlapping = overlapping;
        report
    }

    fn pair_material(&self, pair: &ShapePair) -> PhysicsMaterial {
        let shape = |key: BodyKey, index: usize| {
            self.bodies
                .get(key)
                .and_then(|body| body.shapes.get(index))
                .map(|shape| shape.material)
                .unwrap_or_default()
        };
        shape(pair.body_a, pair.shape_a).combine(&shape(pair.body_b, pair.shape_b))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn trigger_report(pair: ShapePair, phase: TriggerPhase) -> TriggerReport {
    TriggerReport {
        trigger_body: pair.body_a,
        trigger_shape: pair.shape_a,
        other_body: pair.body_b,
        other_shape: pair.shape_b,
        phase,
    }
}

fn recip_or_zero(v: f32) -> f32 {
    if v > 0.0 {
        1.0 / v
    } else {
        0.0
    }
}

fn integrate_dynamic(body: &mut RigidBody, gravity: Vec3, dt: f32) {
    let mut linear_acc = body.force / body.mass;
    if body.affected_by_gravity {
        linear_acc += gravity;
    }
    body.linear_velocity += linear_acc * dt;

    // Torque goes through the principal inertia frame
    let inertia_frame = body.pose.q * body.cmass_local_pose.q;
    let local_torque = inertia_frame.conjugate() * body.torque;
    let inv_inertia = Vec3::new(
        recip_or_zero(body.inertia.x),
        recip_or_zero(body.inertia.y),
        recip_or_zero(body.inertia.z),
    );
    body.angular_velocity += inertia_frame * (local_torque * inv_inertia) * dt;

    body.linear_velocity *= 1.0 / (1.0 + body.linear_damping * dt);
    body.angular_velocity *= 1.0 / (1.0 + body.angular_damping * dt);

    let com = body.center_of_mass() + body.linear_velocity * dt;
    let q = integrate_rotation(body.pose.q, body.angular_velocity, dt);
    body.pose.q = q;
    body.pose.p = com - q * body.cmass_local_pose.p;
}

fn integrate_kinematic(body: &mut RigidBody, dt: f32) {
    match body.kinematic_target.take() {
        Some(target) => {
            if dt > 0.0 {
                body.linear_velocity = (target.p - body.pose.p) / dt;
                body.angular_velocity = rotation_velocity(body.pose.q, target.q, dt);
                body.target_velocity = true;
            }
            body.pose = target;
        }
        None if body.target_velocity => {
            body.linear_velocity = Vec3::ZERO;
            body.angular_velocity = Vec3::ZERO;
            body.target_velocity = false;
        }
        None => {
            body.pose.p += body.linear_velocity * dt;
            body.pose.q = integrate_rotation(body.pose.q, body.angular_velocity, dt);
        }
    }
}

/// Angular velocity turning `from` into `to` over `dt`
fn rotation_velocity(from: Quat, to: Quat, dt: f32) -> Vec3 {
    let (axis, angle) = (to * from.conjugate()).normalize().to_axis_angle();
    let angle = if angle > std::f32::consts::PI {
        angle - std::f32::consts::TAU
    } else {
        angle
    };
    axis * (angle / dt)
}

fn integrate_rotation(q: Quat, angular_velocity: Vec3, dt: f32) -> Quat {
    let angle = angular_velocity.length() * dt;
    if angle > 1e-9 {
        (Quat::from_axis_angle(angular_velocity.normalize(), angle) * q).normalize()
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn zero_gravity() -> PhysicsWorld {
        PhysicsWorld::with_config(PhysicsConfig::new(Vec3::ZERO))
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, 0.0, -9.81));
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_dynamic(Pose::IDENTITY));
        assert!(world.remove_body(key).is_some());
        let new_key = world.add_body(RigidBody::new_dynamic(Pose::IDENTITY));

        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_force_produces_acceleration() {
        let mut world = zero_gravity();
        let key = world.add_body(RigidBody::new_dynamic(Pose::IDENTITY).with_mass(2.0));

        world.add_force(key, Vec3::new(0.0, 0.0, 10.0)).unwrap();
        world.step(0.1);

        let body = world.get_body(key).unwrap();
        // a = F / m = 5, dv = a * dt = 0.5
        assert!((body.linear_velocity.z - 0.5).abs() < 1e-6);
        assert_eq!(body.pending_force(), Vec3::ZERO);
    }

    #[test]
    fn test_gravity_application() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_dynamic(Pose::IDENTITY));
        world.step(0.1);
        let body = world.get_body(key).unwrap();
        assert!((body.linear_velocity.z + 0.981).abs() < 1e-5);
    }

    #[test]
    fn test_torque_spins_body() {
        let mut world = zero_gravity();
        let key = world.add_body(
            RigidBody::new_dynamic(Pose::IDENTITY)
                .with_inertia(Vec3::new(1.0, 1.0, 4.0))
                .with_damping(0.0, 0.0),
        );
        world.add_torque(key, Vec3::new(0.0, 0.0, 8.0)).unwrap();
        world.step(0.5);

        let body = world.get_body(key).unwrap();
        // alpha = 8 / 4 = 2, dw = 1
        assert!((body.angular_velocity.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_damping_slows_velocity() {
        let mut world = zero_gravity();
        let key = world.add_body(
            RigidBody::new_dynamic(Pose::IDENTITY)
                .with_velocity(Vec3::X * 10.0)
                .with_damping(1.0, 0.0),
        );
        world.step(1.0);
        let body = world.get_body(key).unwrap();
        assert!((body.linear_velocity.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_static_body_rejects_forces() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        assert_eq!(world.add_force(key, Vec3::X), Err(PhysicsError::NotDynamic(key)));
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_static(Pose::from_position(Vec3::ONE)));
        world.step(1.0);
        assert_eq!(world.get_body(key).unwrap().pose.p, Vec3::ONE);
    }

    #[test]
    fn test_kinematic_target() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_kinematic(Pose::IDENTITY));
        world.set_kinematic_target(key, Pose::from_position(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        world.step(0.5);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.pose.p, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(body.linear_velocity, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_kinematic_body_stops_at_target() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_kinematic(Pose::IDENTITY));
        world.set_kinematic_target(key, Pose::from_position(Vec3::X)).unwrap();
        world.step(0.5);
        world.step(0.5);
        world.step(0.5);

        let body = world.get_body(key).unwrap();
        assert_eq!(body.pose.p, Vec3::X);
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_kinematic_target_rotation_velocity() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_kinematic(Pose::IDENTITY));
        let turned = Pose::new(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        world.set_kinematic_target(key, turned).unwrap();
        world.step(0.5);

        let body = world.get_body(key).unwrap();
        assert!((body.angular_velocity - Vec3::new(0.0, 0.0, std::f32::consts::PI)).length() < 1e-4);
    }

    #[test]
    fn test_kinematic_velocity_without_target_keeps_moving() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_kinematic(Pose::IDENTITY).with_velocity(Vec3::X));
        world.step(1.0);
        world.step(1.0);
        assert_eq!(world.get_body(key).unwrap().pose.p, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_attach_rejects_degenerate_and_planes_on_dynamic() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_dynamic(Pose::IDENTITY));

        let err = world.attach_shape(key, ShapeDesc::new(Geometry::sphere(0.0))).unwrap_err();
        assert!(matches!(err, PhysicsError::DegenerateGeometry { .. }));

        let err = world.attach_shape(key, ShapeDesc::new(Geometry::plane(Vec3::Z))).unwrap_err();
        assert_eq!(err, PhysicsError::PlaneOnMovingBody);

        assert_eq!(world.attach_shape(key, ShapeDesc::new(Geometry::sphere(1.0))), Ok(0));
        assert_eq!(world.get_body(key).unwrap().shapes().len(), 1);
    }

    #[test]
    fn test_attach_to_removed_body() {
        let mut world = PhysicsWorld::new();
        let key = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        world.remove_body(key);
        let err = world.attach_shape(key, ShapeDesc::new(Geometry::sphere(1.0))).unwrap_err();
        assert_eq!(err, PhysicsError::StaleBody(key));
    }

    fn ball_on_floor(world: &mut PhysicsWorld, height: f32) -> (BodyKey, BodyKey) {
        let floor = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        world.attach_shape(floor, ShapeDesc::new(Geometry::plane(Vec3::Z))).unwrap();
        let ball = world.add_body(
            RigidBody::new_dynamic(Pose::from_position(Vec3::new(0.0, 0.0, height))).with_gravity(false),
        );
        world.attach_shape(ball, ShapeDesc::new(Geometry::sphere(0.5))).unwrap();
        (floor, ball)
    }

    #[test]
    fn test_contact_found_persists_lost() {
        let mut world = zero_gravity();
        let (_floor, ball) = ball_on_floor(&mut world, 0.4);

        let first = world.step(0.01);
        assert_eq!(first.contacts.len(), 1);
        assert_eq!(first.contacts[0].phase, ContactPhase::Found);
        assert_eq!(first.contacts[0].contacts.len(), 1);

        let second = world.step(0.01);
        assert_eq!(second.contacts[0].phase, ContactPhase::Persists);

        world.get_body_mut(ball).unwrap().pose.p.z = 5.0;
        let third = world.step(0.01);
        assert_eq!(third.contacts.len(), 1);
        assert_eq!(third.contacts[0].phase, ContactPhase::Lost);
        assert!(third.contacts[0].contacts.is_empty());

        assert!(world.step(0.01).contacts.is_empty());
    }

    #[test]
    fn test_contact_carries_combined_material() {
        use crate::material::PhysicsMaterial;

        let mut world = zero_gravity();
        let floor = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        world
            .attach_shape(
                floor,
                ShapeDesc::new(Geometry::plane(Vec3::Z)).with_material(PhysicsMaterial::new(0.2, 0.2, 0.0)),
            )
            .unwrap();
        let ball = world.add_body(RigidBody::new_dynamic(Pose::from_position(Vec3::new(0.0, 0.0, 0.4))));
        world
            .attach_shape(
                ball,
                ShapeDesc::new(Geometry::sphere(0.5)).with_material(PhysicsMaterial::new(0.6, 0.4, 1.0)),
            )
            .unwrap();

        let found = world.step(0.01);
        assert!((found.contacts[0].material.static_friction - 0.4).abs() < 1e-6);
        assert!((found.contacts[0].material.restitution - 0.5).abs() < 1e-6);

        world.get_body_mut(ball).unwrap().pose.p.z = 5.0;
        let lost = world.step(0.01);
        assert_eq!(lost.contacts[0].phase, ContactPhase::Lost);
        assert_eq!(lost.contacts[0].material, found.contacts[0].material);
    }

    #[test]
    fn test_lost_contacts_are_ordered_by_pair() {
        let mut world = zero_gravity();
        let floor = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        world.attach_shape(floor, ShapeDesc::new(Geometry::plane(Vec3::Z))).unwrap();
        let balls: Vec<BodyKey> = (0..6)
            .map(|i| {
                let key = world.add_body(
                    RigidBody::new_dynamic(Pose::from_position(Vec3::new(i as f32 * 2.0, 0.0, 0.4))),
                );
                world.attach_shape(key, ShapeDesc::new(Geometry::sphere(0.5))).unwrap();
                key
            })
            .collect();
        world.step(0.01);

        for &ball in &balls {
            world.get_body_mut(ball).unwrap().pose.p.z = 5.0;
        }
        let report = world.step(0.01);
        let pairs: Vec<ShapePair> = report.contacts.iter().map(|c| c.pair).collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs, sorted);
    }

    #[test]
    fn test_trigger_enter_and_leave() {
        let mut world = zero_gravity();
        let zone = world.add_body(RigidBody::new_static(Pose::IDENTITY));
        world
            .attach_shape(zone, ShapeDesc::new(Geometry::sphere(1.0)).with_trigger(true))
            .unwrap();
        let ball = world.add_body(RigidBody::new_dynamic(Pose::from_position(Vec3::X * 1.2)));
        world.attach_shape(ball, ShapeDesc::new(Geometry::sphere(0.5))).unwrap();

        let report = world.step(0.01);
        assert!(report.contacts.is_empty());
        assert_eq!(report.triggers.len(), 1);
        assert_eq!(report.triggers[0].trigger_body, zone);
        assert_eq!(report.triggers[0].other_body, ball);
        assert_eq!(report.triggers[0].phase, TriggerPhase::Entered);

        assert!(world.step(0.01).triggers.is_empty());

        world.get_body_mut(ball).unwrap().pose.p = Vec3::X * 10.0;
        let report = world.step(0.01);
        assert_eq!(report.triggers[0].phase, TriggerPhase::Left);
    }

    #[test]
    fn test_filtered_pairs_are_ignored() {
        use crate::collision::CollisionFilter;

        let mut world = zero_gravity();
        let (floor, ball) = ball_on_floor(&mut world, 0.4);
        world.remove_body(ball);
        let debris = world.add_body(RigidBody::new_dynamic(Pose::from_position(Vec3::new(0.0, 0.0, 0.4))));
        world
            .attach_shape(debris, ShapeDesc::new(Geometry::sphere(0.5)).with_filter(CollisionFilter::debris()))
            .unwrap();
        // Floor keeps the default layer, which debris does not react to
        assert!(world.get_body(floor).is_some());
        assert!(world.step(0.01).contacts.is_empty());
    }
}
