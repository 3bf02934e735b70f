use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::ecs::system::SystemParam;
use bevy::math::bounding::{Aabb2d, RayCast2d};
use bevy::prelude::*;

use crate::actor::CollisionActor;
use crate::components::{DebugRays, MotionIntent};
use crate::math::{AdjustPrecision, AsF32, Float, Vector2};
use crate::spatial_ext::SpatialExt;
use crate::RayActorPipelineStages;

/// A solid axis-aligned block of level geometry, centered on the entity's
/// `GlobalTransform`.
///
/// This is the scene representation of the built-in backend. Actors never
/// carry it, so they cannot obstruct themselves.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub half_extents: Vector2,
}

impl Obstacle {
    pub fn new(half_extents: Vector2) -> Self {
        Self { half_extents }
    }
}

/// Scene queries over every [`Obstacle`] in the world.
#[derive(SystemParam)]
pub struct AabbSpatialQuery<'w, 's> {
    obstacles: Query<'w, 's, (&'static GlobalTransform, &'static Obstacle)>,
}

impl SpatialExt for AabbSpatialQuery<'_, '_> {
    fn cast_ray(&self, origin: Vector2, direction: Vector2, max_distance: Float) -> Option<Float> {
        cast_ray_against_aabbs(
            origin,
            direction,
            max_distance,
            self.obstacles.iter().map(|(transform, obstacle)| {
                Aabb2d::new(
                    transform.translation().truncate(),
                    obstacle.half_extents.f32(),
                )
            }),
        )
    }
}

/// Nearest-hit ray test against a set of axis-aligned boxes.
///
/// A ray starting inside a box reports a hit at distance zero.
pub fn cast_ray_against_aabbs(
    origin: Vector2,
    direction: Vector2,
    max_distance: Float,
    aabbs: impl IntoIterator<Item = Aabb2d>,
) -> Option<Float> {
    let direction = Dir2::new(direction.f32()).ok()?;
    let cast = RayCast2d::new(origin.f32(), direction, max_distance.f32());
    aabbs
        .into_iter()
        .filter_map(|aabb| cast.aabb_intersection_at(&aabb))
        .min_by(|a, b| a.total_cmp(b))
        .map(|distance| distance.adjust_precision())
}

/// Add this plugin, alongside [`RayActorPlugin`](crate::RayActorPlugin), to
/// resolve actors against [`Obstacle`] geometry.
///
/// Runs in the `Update` schedule by default; use
/// [`new`](AabbBackendPlugin::new) to run it wherever the rest of the
/// pipeline runs.
pub struct AabbBackendPlugin {
    schedule: InternedScheduleLabel,
}

impl AabbBackendPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for AabbBackendPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for AabbBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            self.schedule,
            apply_motion_system.in_set(RayActorPipelineStages::Motors),
        );
    }
}

fn apply_motion_system(
    spatial: AabbSpatialQuery,
    mut query: Query<(
        &CollisionActor,
        &MotionIntent,
        &mut Transform,
        Option<&mut DebugRays>,
    )>,
) {
    for (actor, intent, mut transform, mut debug_rays) in query.iter_mut() {
        if !intent.desired_motion.is_finite() {
            error!(
                "ignoring non-finite motion intent {:?}",
                intent.desired_motion
            );
            continue;
        }
        let position = transform.translation.truncate().adjust_precision();
        let applied = if let Some(debug_rays) = debug_rays.as_mut() {
            debug_rays.0.clear();
            actor.resolve_traced(position, intent.desired_motion, &spatial, &mut |ray| {
                debug_rays.0.push(ray)
            })
        } else {
            actor.resolve(position, intent.desired_motion, &spatial)
        };
        transform.translation += applied.f32().extend(0.0);
    }
}
