//! actorsim - headless actor simulation demo
//!
//! Drops a ball onto a ground plane through a trigger volume and logs the
//! step, trigger and contact events the actors receive.

use std::cell::Cell;
use std::rc::Rc;

use actorsim::{
    ActorBuilder, AppConfig, CollisionFilter, CollisionLayer, CollisionShape, ContactPhase,
    DynamicActor, Pose, Scene, SceneBody, SceneError, Vec3,
};

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Err(e) = run(&config) {
        log::error!("simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), SceneError> {
    let mut scene = Scene::from_config(config);

    ActorBuilder::new("ground")
        .add_shape(CollisionShape::plane(Vec3::Z))
        .add_visual(SceneBody::visual("ground-mesh"))
        .build_static(&mut scene)?;

    let gate = ActorBuilder::new("gate")
        .with_pose(Pose::from_position(Vec3::new(0.0, 0.0, 1.0)))
        .add_shape(
            CollisionShape::cuboid(Vec3::new(1.0, 1.0, 0.25))
                .with_filter(CollisionFilter::trigger(CollisionLayer::ALL))
                .as_trigger(),
        )
        .build_kinematic(&mut scene)?;

    let ball = ActorBuilder::new("ball")
        .with_pose(Pose::from_position(Vec3::new(0.0, 0.0, 2.0)))
        .add_shape(CollisionShape::sphere(0.25))
        .add_visual(SceneBody::visual("ball-mesh"))
        .with_mass(2.0)
        .build_dynamic(&mut scene)?;

    let landed = Rc::new(Cell::new(None));
    if let Some(actor) = scene.actor_mut::<DynamicActor>(ball) {
        let landed_at = Rc::clone(&landed);
        actor.on_contact(move |_, _, detail| {
            if detail.phase == ContactPhase::Found && landed_at.get().is_none() {
                landed_at.set(detail.points.first().map(|c| c.point));
            }
            Ok(())
        });
        actor.on_trigger(move |_, _, detail| {
            log::info!("ball {:?} the gate", detail.phase);
            Ok(())
        });
    }
    if let Some(actor) = scene.get_mut(gate) {
        actor.render_collision_bodies(true);
    }

    for _ in 0..config.simulation.ticks {
        if let Err(e) = scene.step() {
            log::warn!("{}", e);
        }
        scene.update_render();
        if landed.get().is_some() {
            break;
        }
    }

    match (landed.get(), scene.actor::<DynamicActor>(ball)) {
        (Some(point), Some(actor)) => log::info!(
            "ball landed at {:?} after {:.2}s, velocity {:?}",
            point,
            scene.elapsed(),
            actor.velocity()
        ),
        _ => log::info!("ball still falling after {:.2}s", scene.elapsed()),
    }
    Ok(())
}
