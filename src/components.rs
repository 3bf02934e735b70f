use bevy::prelude::*;

use crate::math::{Float, Vector2};

/// The displacement the character layer wants to move by this tick.
///
/// Produced fresh by the motor system each tick
/// ([`RayActorPipelineStages::Logic`](crate::RayActorPipelineStages)) and
/// consumed by the backend's motion system
/// ([`RayActorPipelineStages::Motors`](crate::RayActorPipelineStages)), which
/// resolves it against the level geometry before translating the entity.
#[derive(Component, Default, Debug)]
pub struct MotionIntent {
    /// The desired frame displacement - a velocity already integrated over
    /// the tick duration.
    pub desired_motion: Vector2,
}

/// A single ray emitted during collision resolution.
///
/// Purely observational - tracing rays has no effect on the resolution
/// itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracedRay {
    pub origin: Vector2,
    /// Unit vector along the cast.
    pub direction: Vector2,
    /// The cast length at the time the ray was traced. Hits shrink the fan's
    /// length, so later rays in the same fan report the shortened value.
    pub length: Float,
}

/// Optional per-actor storage of the rays cast during the last move.
///
/// Add this component next to a [`CollisionActor`](crate::CollisionActor) to
/// get its ray fans recorded every tick, e.g. for a debug overlay. Cleared
/// and refilled on each move.
#[derive(Component, Default, Debug)]
pub struct DebugRays(pub Vec<TracedRay>);
