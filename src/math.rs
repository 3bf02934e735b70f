//! Precision-switchable math types.
//!
//! The crate does its motion math in [`Float`]/[`Vector2`], which compile to
//! `f32`/`Vec2` by default and to `f64`/`DVec2` when the `f64` feature is
//! enabled.

#[cfg(feature = "f64")]
pub type Float = f64;
#[cfg(not(feature = "f64"))]
pub type Float = f32;

#[cfg(feature = "f64")]
use bevy::math::DVec2;
use bevy::math::Vec2;

#[cfg(feature = "f64")]
pub type Vector2 = DVec2;
#[cfg(not(feature = "f64"))]
pub type Vector2 = Vec2;

/// Adjust the precision of the math construct to the precision chosen for compilation.
pub trait AdjustPrecision {
    /// A math construct type with the desired precision.
    type Adjusted;
    /// Adjusts the precision of [`self`] to [`Self::Adjusted`](#associatedtype.Adjusted).
    fn adjust_precision(&self) -> Self::Adjusted;
}

impl AdjustPrecision for f32 {
    type Adjusted = Float;
    fn adjust_precision(&self) -> Self::Adjusted {
        #[cfg(feature = "f64")]
        return (*self).into();
        #[cfg(not(feature = "f64"))]
        return *self;
    }
}

#[cfg(feature = "f64")]
impl AdjustPrecision for f64 {
    type Adjusted = Float;
    fn adjust_precision(&self) -> Self::Adjusted {
        *self
    }
}

impl AdjustPrecision for Vec2 {
    type Adjusted = Vector2;
    fn adjust_precision(&self) -> Self::Adjusted {
        #[cfg(feature = "f64")]
        return self.as_dvec2();
        #[cfg(not(feature = "f64"))]
        return *self;
    }
}

#[cfg(feature = "f64")]
impl AdjustPrecision for DVec2 {
    type Adjusted = Vector2;
    fn adjust_precision(&self) -> Self::Adjusted {
        *self
    }
}

/// Adjust the precision down to `f32` regardless of compilation.
pub trait AsF32 {
    /// The `f32` version of a math construct.
    type F32;
    /// Returns the `f32` version of this type.
    fn f32(&self) -> Self::F32;
}

#[cfg(feature = "f64")]
impl AsF32 for DVec2 {
    type F32 = Vec2;
    fn f32(&self) -> Self::F32 {
        self.as_vec2()
    }
}

impl AsF32 for Vec2 {
    type F32 = Self;
    fn f32(&self) -> Self::F32 {
        *self
    }
}

#[cfg(feature = "f64")]
impl AsF32 for f64 {
    type F32 = f32;
    fn f32(&self) -> Self::F32 {
        *self as f32
    }
}

impl AsF32 for f32 {
    type F32 = Self;
    fn f32(&self) -> Self::F32 {
        *self
    }
}
