//! A raycast-resolved 2D platformer character controller for Bevy.
//!
//! Two layers, wired together by a per-tick pipeline:
//!
//! * [`CollisionActor`] - an axis-aligned box body. Each tick its desired
//!   displacement is resolved against level geometry with one fan of
//!   parallel rays per moving axis, clamping the displacement so the box
//!   stops a skin margin short of the first obstruction instead of
//!   tunneling through it.
//! * [`CharacterMotor`] - turns a horizontal input axis into a velocity with
//!   acceleration/deceleration easing driven by two response curves, adds an
//!   optional constant gravity term, and emits the frame displacement as a
//!   [`MotionIntent`].
//!
//! The actor only ever talks to the scene through the narrow [`SpatialExt`]
//! ray query trait. The crate ships one implementation of it - the
//! [`Obstacle`]-based AABB backend behind [`AabbBackendPlugin`] - and games
//! with a real physics engine can swap in their own.
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_rayactor::math::Vector2;
//! use bevy_rayactor::{
//!     AabbBackendPlugin, CharacterMotorBundle, CollisionActor, Obstacle, RayActorPlugin,
//!     RaycastConfig,
//! };
//!
//! let mut app = App::new();
//! app.add_plugins((RayActorPlugin::default(), AabbBackendPlugin::default()));
//! app.add_systems(Startup, |mut commands: Commands| {
//!     commands.spawn((
//!         Transform::default(),
//!         CollisionActor::new(Vector2::splat(0.5), RaycastConfig::default()).unwrap(),
//!         CharacterMotorBundle::default(),
//!     ));
//!     commands.spawn((
//!         Transform::from_xyz(0.0, -3.0, 0.0),
//!         Obstacle::new(Vector2::new(10.0, 0.5)),
//!     ));
//! });
//! ```

mod actor;
mod backend_aabb;
mod components;
pub mod math;
mod motor;
mod spatial_ext;

pub use actor::*;
pub use backend_aabb::*;
pub use components::*;
pub use motor::*;
pub use spatial_ext::*;

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

/// Umbrella system set for [`RayActorPipelineStages`].
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct RayActorSystemSet;

/// The stages of the per-tick pipeline, chained in declaration order.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum RayActorPipelineStages {
    /// Game systems feed [`CharacterControls`](crate::CharacterControls)
    /// from whatever input source they poll.
    UserControls,
    /// The motor advances its easing state and produces the frame's
    /// [`MotionIntent`](crate::MotionIntent).
    Logic,
    /// A backend resolves the intent against the scene and translates the
    /// entity.
    Motors,
}

/// The core plugin: pipeline ordering plus the character motor.
///
/// A backend plugin (such as [`AabbBackendPlugin`]) must be added separately
/// to the same schedule, otherwise intents are produced but nothing moves.
pub struct RayActorPlugin {
    schedule: InternedScheduleLabel,
}

impl RayActorPlugin {
    /// Run the pipeline in the given schedule - typically `Update` for
    /// per-frame simulation or `FixedUpdate` for a fixed tick.
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for RayActorPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for RayActorPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                RayActorPipelineStages::UserControls,
                RayActorPipelineStages::Logic,
                RayActorPipelineStages::Motors,
            )
                .chain()
                .in_set(RayActorSystemSet),
        );
        app.add_systems(
            self.schedule,
            motor::character_motor_system.in_set(RayActorPipelineStages::Logic),
        );
    }
}
