use bevy::math::curve::{EaseFunction, EasingCurve};
use bevy::prelude::*;

use crate::components::MotionIntent;
use crate::math::{AdjustPrecision, AsF32, Float, Vector2};

/// Easing for one side of the motor's speed response.
#[derive(Clone, Copy, Debug)]
pub struct EasingSettings {
    /// When set, this side completes instantly - its timer snaps straight
    /// to 1 and the curve is only ever sampled at its end.
    pub disabled: bool,

    /// How fast the timer runs, in inverse seconds. 1.0 means the full curve
    /// plays out over one second.
    pub amount: Float,

    /// Shape of the response over the timer's `[0, 1]` domain.
    pub ease: EaseFunction,
}

impl Default for EasingSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            amount: 1.0,
            ease: EaseFunction::Linear,
        }
    }
}

/// Tuning for a player-controlled character.
///
/// Per tick, the motor turns the horizontal input axis from
/// [`CharacterControls`] into an eased velocity and writes the resulting
/// frame displacement into the entity's [`MotionIntent`].
#[derive(Component, Clone, Debug)]
pub struct CharacterMotor {
    /// Horizontal speed, in units per second, when the easing multiplier is
    /// at 1.
    pub movement_speed: Float,

    /// Speed ramp-up while input is held. The curve is sampled rising from
    /// 0 to 1.
    pub acceleration: EasingSettings,

    /// Speed ramp-down after input is released. The curve is sampled falling
    /// from 1 to 0, so the same `ease` shape works for both sides.
    pub deceleration: EasingSettings,

    /// Constant downward velocity term, in units per second. `None` leaves
    /// the character unaffected by gravity.
    pub gravity: Option<Float>,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            acceleration: Default::default(),
            deceleration: Default::default(),
            gravity: None,
        }
    }
}

/// Where the player wants to go. Written by game systems (usually in
/// [`RayActorPipelineStages::UserControls`](crate::RayActorPipelineStages)),
/// read by the motor once per tick.
#[derive(Component, Default, Debug)]
pub struct CharacterControls {
    /// Normalized horizontal input axis, in `[-1, 1]`. Only the sign matters
    /// for direction; any non-zero value counts as "held".
    pub horizontal: Float,
}

/// Which side of the speed response is currently playing out.
///
/// Exactly one timer exists at a time, so the two sides can never advance
/// together. The only cross-state rule is resume-from-complement: a switch
/// starts the new timer at one minus the old one, which keeps the eased
/// magnitude continuous across the switch for complementary curve pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
enum EasingPhase {
    Accelerating { time: Float },
    Decelerating { time: Float },
}

/// The motor's only cross-tick state: the easing phase and the latched
/// movement direction.
#[derive(Component, Clone, Debug)]
pub struct CharacterMotorState {
    phase: EasingPhase,
    last_direction: Float,
}

impl Default for CharacterMotorState {
    fn default() -> Self {
        Self {
            // A fresh motor is fully settled, so the first press ramps up
            // from zero speed.
            phase: EasingPhase::Decelerating { time: 1.0 },
            last_direction: 0.0,
        }
    }
}

impl CharacterMotorState {
    /// The direction sign of the most recent non-zero input. Stays latched
    /// through deceleration, so the character eases out along the direction
    /// it was last moving. Zero only before the first ever input.
    pub fn last_direction(&self) -> Float {
        self.last_direction
    }

    /// The current eased speed multiplier: the active side's curve sampled
    /// at the active timer.
    pub fn velocity_multiplier(&self, motor: &CharacterMotor) -> Float {
        match self.phase {
            EasingPhase::Accelerating { time } => EasingCurve::new(0.0, 1.0, motor.acceleration.ease)
                .sample_clamped(time.f32())
                .adjust_precision(),
            EasingPhase::Decelerating { time } => EasingCurve::new(1.0, 0.0, motor.deceleration.ease)
                .sample_clamped(time.f32())
                .adjust_precision(),
        }
    }

    /// Advance the motor by one tick and return the frame displacement to
    /// feed the actor.
    pub fn tick(&mut self, motor: &CharacterMotor, input: Float, delta: Float) -> Vector2 {
        if input != 0.0 {
            self.last_direction = input.signum();
        }
        self.phase = match (self.phase, input != 0.0) {
            (EasingPhase::Decelerating { time }, true) => EasingPhase::Accelerating {
                time: advance(1.0 - time, &motor.acceleration, delta),
            },
            (EasingPhase::Accelerating { time }, true) => EasingPhase::Accelerating {
                time: advance(time, &motor.acceleration, delta),
            },
            (EasingPhase::Accelerating { time }, false) => EasingPhase::Decelerating {
                time: advance(1.0 - time, &motor.deceleration, delta),
            },
            (EasingPhase::Decelerating { time }, false) => EasingPhase::Decelerating {
                time: advance(time, &motor.deceleration, delta),
            },
        };
        let multiplier = self.velocity_multiplier(motor);
        let mut velocity = Vector2::X * (self.last_direction * motor.movement_speed * multiplier);
        if let Some(gravity) = motor.gravity {
            velocity.y -= gravity;
        }
        velocity * delta
    }
}

fn advance(time: Float, settings: &EasingSettings, delta: Float) -> Float {
    if settings.disabled {
        1.0
    } else {
        (time + delta * settings.amount).min(1.0)
    }
}

/// Everything a motor-driven entity needs besides its
/// [`CollisionActor`](crate::CollisionActor) and `Transform`.
#[derive(Bundle, Default)]
pub struct CharacterMotorBundle {
    pub motor: CharacterMotor,
    pub controls: CharacterControls,
    pub state: CharacterMotorState,
    pub intent: MotionIntent,
}

impl CharacterMotorBundle {
    pub fn new_with_config(motor: CharacterMotor) -> Self {
        Self {
            motor,
            ..Default::default()
        }
    }
}

pub(crate) fn character_motor_system(
    time: Res<Time>,
    mut query: Query<(
        &CharacterMotor,
        &CharacterControls,
        &mut CharacterMotorState,
        &mut MotionIntent,
    )>,
) {
    let frame_duration = time.delta_secs().adjust_precision();
    if frame_duration == 0.0 {
        return;
    }
    for (motor, controls, mut state, mut intent) in query.iter_mut() {
        intent.desired_motion = state.tick(motor, controls.horizontal, frame_duration);
    }
}
