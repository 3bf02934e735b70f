use std::time::Duration;

use bevy::prelude::*;
use bevy_rayactor::math::Vector2;
use bevy_rayactor::{
    AabbBackendPlugin, CharacterControls, CharacterMotor, CharacterMotorBundle, CollisionActor,
    DebugRays, EasingSettings, MotionIntent, Obstacle, RayActorPlugin, RaycastConfig,
};

fn test_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.add_plugins((RayActorPlugin::default(), AabbBackendPlugin::default()));
    app
}

fn advance(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn spawn_actor(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            CollisionActor::new(Vector2::splat(0.5), RaycastConfig::default()).unwrap(),
        ))
        .id()
}

fn spawn_obstacle(app: &mut App, x: f32, y: f32, half_extents: Vec2) {
    app.world_mut().spawn((
        Transform::from_xyz(x, y, 0.0),
        GlobalTransform::from(Transform::from_xyz(x, y, 0.0)),
        Obstacle::new(half_extents.into()),
    ));
}

fn translation(app: &mut App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

#[track_caller]
fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-4,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn unobstructed_intent_is_applied_in_full() {
    let mut app = test_app();
    let actor = spawn_actor(&mut app);
    app.world_mut().entity_mut(actor).insert(MotionIntent {
        desired_motion: Vector2::new(0.0, -5.0),
    });
    advance(&mut app, 1.0);
    assert_close(translation(&mut app, actor), Vec3::new(0.0, -5.0, 0.0));
}

#[test]
fn floor_stops_a_fall_a_skin_margin_short() {
    let mut app = test_app();
    let actor = spawn_actor(&mut app);
    app.world_mut().entity_mut(actor).insert(MotionIntent {
        desired_motion: Vector2::new(0.0, -5.0),
    });
    // Floor top surface 2 units below the box bottom.
    spawn_obstacle(&mut app, 0.0, -3.0, Vec2::new(10.0, 0.5));
    advance(&mut app, 1.0);
    assert_close(
        translation(&mut app, actor),
        Vec3::new(0.0, -(2.0 - 0.02), 0.0),
    );
}

#[test]
fn input_flows_through_motor_to_translation() {
    let mut app = test_app();
    let actor = spawn_actor(&mut app);
    app.world_mut()
        .entity_mut(actor)
        .insert(CharacterMotorBundle::default());
    app.world_mut()
        .get_mut::<CharacterControls>(actor)
        .unwrap()
        .horizontal = 1.0;

    // Half a second of linear ramp-up: multiplier 0.5.
    advance(&mut app, 0.5);
    assert_close(translation(&mut app, actor), Vec3::new(1.25, 0.0, 0.0));

    // Ramp saturates: full speed for the second half-second.
    advance(&mut app, 0.5);
    assert_close(translation(&mut app, actor), Vec3::new(3.75, 0.0, 0.0));
}

#[test]
fn walking_into_a_wall_stops_at_its_face() {
    let mut app = test_app();
    let actor = spawn_actor(&mut app);
    app.world_mut()
        .entity_mut(actor)
        .insert(CharacterMotorBundle::new_with_config(CharacterMotor {
            acceleration: EasingSettings {
                disabled: true,
                ..Default::default()
            },
            ..Default::default()
        }));
    app.world_mut()
        .get_mut::<CharacterControls>(actor)
        .unwrap()
        .horizontal = 1.0;
    // Wall face 1 unit to the right of the box edge.
    spawn_obstacle(&mut app, 2.0, 0.0, Vec2::new(0.5, 10.0));

    // Full speed instantly (acceleration disabled) would cover 5 units.
    advance(&mut app, 1.0);
    assert_close(
        translation(&mut app, actor),
        Vec3::new(1.0 - 0.02, 0.0, 0.0),
    );

    // Pressed against the wall, further input gains nothing.
    advance(&mut app, 1.0);
    let x = translation(&mut app, actor).x;
    assert!((x - (1.0 - 0.02)).abs() < 1e-3);
}

#[test]
fn debug_rays_record_the_last_move() {
    let mut app = test_app();
    let actor = spawn_actor(&mut app);
    app.world_mut().entity_mut(actor).insert((
        MotionIntent {
            desired_motion: Vector2::new(0.0, -5.0),
        },
        DebugRays::default(),
    ));
    advance(&mut app, 1.0);
    let rays = &app.world().get::<DebugRays>(actor).unwrap().0;
    // One vertical fan of the default two rays; no horizontal motion.
    assert_eq!(rays.len(), 2);
    assert!(rays
        .iter()
        .all(|ray| ray.direction == Vector2::new(0.0, -1.0)));
}
