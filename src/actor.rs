use bevy::prelude::*;
use thiserror::Error;

use crate::components::TracedRay;
use crate::math::{Float, Vector2};
use crate::spatial_ext::SpatialExt;

/// Rejected configuration when building a [`RaycastConfig`] or a
/// [`CollisionActor`].
///
/// These are construction-time contract violations. Once an actor exists, a
/// move can no longer fail - a ray that finds nothing is just free movement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidActorConfig {
    #[error("ray count {0} is outside the supported range 2..=10")]
    RayCountOutOfRange(usize),
    #[error("skin margin {0} is outside the supported range 0.0..=0.05")]
    SkinMarginOutOfRange(Float),
    #[error("half extents ({0}, {1}) must both be strictly positive")]
    DegenerateHalfExtents(Float, Float),
}

/// Tuning for the ray fans used to detect obstructions.
///
/// Validated when constructed, immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastConfig {
    ray_count: usize,
    skin_margin: Float,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            ray_count: 2,
            skin_margin: 0.02,
        }
    }
}

impl RaycastConfig {
    /// `ray_count` must be in `2..=10` and `skin_margin` in `0.0..=0.05`.
    pub fn new(ray_count: usize, skin_margin: Float) -> Result<Self, InvalidActorConfig> {
        if !(2..=10).contains(&ray_count) {
            return Err(InvalidActorConfig::RayCountOutOfRange(ray_count));
        }
        if !(0.0..=0.05).contains(&skin_margin) {
            return Err(InvalidActorConfig::SkinMarginOutOfRange(skin_margin));
        }
        Ok(Self {
            ray_count,
            skin_margin,
        })
    }

    /// Number of parallel rays in each fan.
    ///
    /// Never below 2 - a single ray cannot bracket both edges of the box.
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Small inward/forward offset that keeps rays from starting exactly on
    /// a surface, avoiding self-collision artifacts.
    pub fn skin_margin(&self) -> Float {
        self.skin_margin
    }
}

/// The four box corners the ray fans are derived from.
///
/// Transient - re-derived from the current box on every move, never cached
/// across ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayOrigins {
    pub bottom_left: Vector2,
    pub bottom_right: Vector2,
    pub top_left: Vector2,
    pub top_right: Vector2,
}

/// An axis-aligned box body that moves by raycast-resolved displacements.
///
/// The actor holds no position of its own - it lives on an entity whose
/// `Transform` is the source of truth. Each tick, the backend's motion system
/// feeds the entity's [`MotionIntent`](crate::MotionIntent) through
/// [`resolve`](Self::resolve) and translates the entity by the result, so the
/// box never tunnels through or comes to overlap solid geometry.
///
/// Resolution casts `ray_count` parallel rays per moving axis against the
/// scene (at most two fans per move), shortening the displacement to stop a
/// skin margin before the first obstruction.
#[derive(Component, Debug)]
pub struct CollisionActor {
    half_extents: Vector2,
    config: RaycastConfig,
}

impl CollisionActor {
    pub fn new(half_extents: Vector2, config: RaycastConfig) -> Result<Self, InvalidActorConfig> {
        if half_extents.x <= 0.0 || half_extents.y <= 0.0 {
            return Err(InvalidActorConfig::DegenerateHalfExtents(
                half_extents.x,
                half_extents.y,
            ));
        }
        Ok(Self {
            half_extents,
            config,
        })
    }

    /// Half the box size on each axis.
    pub fn half_extents(&self) -> Vector2 {
        self.half_extents
    }

    /// Resize the box, e.g. for crouching. Takes effect on the next move -
    /// the box is re-derived on every call, never cached across ticks.
    ///
    /// # Panics
    ///
    /// Panics if either extent is not strictly positive.
    pub fn set_half_extents(&mut self, half_extents: Vector2) {
        assert!(
            0.0 < half_extents.x && 0.0 < half_extents.y,
            "half extents ({}, {}) must both be strictly positive",
            half_extents.x,
            half_extents.y,
        );
        self.half_extents = half_extents;
    }

    pub fn config(&self) -> &RaycastConfig {
        &self.config
    }

    /// The corners of the box were the actor standing at `position`.
    pub fn ray_origins(&self, position: Vector2) -> RayOrigins {
        let min = position - self.half_extents;
        let max = position + self.half_extents;
        RayOrigins {
            bottom_left: Vector2::new(min.x, min.y),
            bottom_right: Vector2::new(max.x, min.y),
            top_left: Vector2::new(min.x, max.y),
            top_right: Vector2::new(max.x, max.y),
        }
    }

    /// Clamp `velocity` (a frame displacement) against the geometry visible
    /// through `spatial`, for the box currently centered at `position`.
    ///
    /// Axes are resolved independently and sequentially: vertical first, then
    /// horizontal, each only when its component is non-zero. There is no
    /// re-resolution between the axes - the horizontal fan is placed using
    /// the *unclamped* vertical component.
    pub fn resolve(
        &self,
        position: Vector2,
        velocity: Vector2,
        spatial: &impl SpatialExt,
    ) -> Vector2 {
        self.resolve_traced(position, velocity, spatial, &mut |_| {})
    }

    /// Same as [`resolve`](Self::resolve), reporting every cast ray to
    /// `observe`. Tracing is observational only.
    pub fn resolve_traced(
        &self,
        position: Vector2,
        velocity: Vector2,
        spatial: &impl SpatialExt,
        observe: &mut impl FnMut(TracedRay),
    ) -> Vector2 {
        let intended = velocity;
        let mut velocity = velocity;
        // Spacing derives from the box width on both axes.
        let ray_spacing = (2.0 * self.half_extents.x) / (self.config.ray_count - 1) as Float;
        let origins = self.ray_origins(position);
        if velocity.y != 0.0 {
            self.vertical_pass(
                &origins,
                intended.x,
                &mut velocity,
                ray_spacing,
                spatial,
                observe,
            );
        }
        if velocity.x != 0.0 {
            self.horizontal_pass(
                &origins,
                intended.y,
                &mut velocity,
                ray_spacing,
                spatial,
                observe,
            );
        }
        velocity
    }

    fn vertical_pass(
        &self,
        origins: &RayOrigins,
        intended_x: Float,
        velocity: &mut Vector2,
        ray_spacing: Float,
        spatial: &impl SpatialExt,
        observe: &mut impl FnMut(TracedRay),
    ) {
        let margin = self.config.skin_margin;
        let direction = velocity.y.signum();
        let mut ray_length = velocity.y.abs() + margin;
        let row = if direction < 0.0 {
            origins.bottom_left
        } else {
            origins.top_left
        };
        // Rays start on the leading face, where the box will be on the other
        // axis, pulled a margin in along the fan so they cannot graze the
        // actor's own corners.
        let row = row + Vector2::new(intended_x + margin, 0.0);
        let cast_direction = Vector2::new(0.0, direction);
        for i in 0..self.config.ray_count {
            let origin = row + Vector2::new(ray_spacing * i as Float * (1.0 - 2.0 * margin), 0.0);
            if let Some(distance) = spatial.cast_ray(origin, cast_direction, ray_length) {
                // A zero-distance hit means the ray started inside geometry;
                // those never clamp.
                if 0.0 < distance {
                    velocity.y = (distance - margin).max(0.0) * direction;
                    ray_length = distance;
                }
            }
            observe(TracedRay {
                origin,
                direction: cast_direction,
                length: ray_length,
            });
        }
    }

    fn horizontal_pass(
        &self,
        origins: &RayOrigins,
        intended_y: Float,
        velocity: &mut Vector2,
        ray_spacing: Float,
        spatial: &impl SpatialExt,
        observe: &mut impl FnMut(TracedRay),
    ) {
        let margin = self.config.skin_margin;
        let direction = velocity.x.signum();
        let mut ray_length = velocity.x.abs() + margin;
        let row = if direction < 0.0 {
            origins.top_left
        } else {
            origins.top_right
        };
        let row = row + Vector2::new(0.0, intended_y - margin);
        let cast_direction = Vector2::new(direction, 0.0);
        for i in 0..self.config.ray_count {
            let origin = row - Vector2::new(0.0, ray_spacing * i as Float * (1.0 - 2.0 * margin));
            if let Some(distance) = spatial.cast_ray(origin, cast_direction, ray_length) {
                if 0.0 < distance {
                    velocity.x = (distance - margin).max(0.0) * direction;
                    ray_length = distance;
                }
            }
            observe(TracedRay {
                origin,
                direction: cast_direction,
                length: ray_length,
            });
        }
    }
}
