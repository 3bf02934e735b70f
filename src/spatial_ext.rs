use crate::math::{Float, Vector2};

/// The narrow scene-query capability the collision resolution needs from its
/// environment.
///
/// Physics integrations implement this on a `SystemParam` that can see the
/// level geometry. The crate ships one such integration for plain
/// axis-aligned boxes ([`AabbSpatialQuery`](crate::AabbSpatialQuery)); games
/// that already run a physics engine can provide their own instead.
pub trait SpatialExt {
    /// Cast a ray and return the distance to the nearest hit, if any lies
    /// within `max_distance`.
    ///
    /// A ray that starts on (or inside) geometry may legitimately report a
    /// hit at distance zero; the caller decides what to do with it.
    fn cast_ray(&self, origin: Vector2, direction: Vector2, max_distance: Float) -> Option<Float>;
}
