//! Kernel traits.
//!
//! Every kernel is a method on [`Dispatcher`](crate::simd::Dispatcher), one
//! trait per family, implemented once per register type. The traits build on
//! each other the same way the kernels do: masking needs bitwise operations,
//! `abs` and `clamp` need comparisons, geometry and trigonometry need the
//! fused family.
//!
//! ```text
//! Bitwise -> Comparison -> Arithmetic -> Fused -> Geometry
//!                                              -> Trigonometry
//! ```
//!
//! [`VectorMath`] wraps the same kernels as methods on the registers
//! themselves, running through [`Dispatcher::global`](crate::simd::Dispatcher::global).

mod arithmetic;
mod bitwise;
mod comparison;
mod fused;
mod geometry;
mod trig;

pub use arithmetic::Arithmetic;
pub use bitwise::Bitwise;
pub use comparison::Comparison;
pub use fused::Fused;
pub use geometry::Geometry;
pub use trig::{coefficients, Trigonometry};

use crate::simd::mask::LaneMask;
use crate::simd::{Dispatcher, SimdRegister};

/// Every kernel family for registers of type `R`.
pub trait Kernels<R: SimdRegister>: Geometry<R> + Trigonometry<R> {}

impl<R: SimdRegister, D: Geometry<R> + Trigonometry<R>> Kernels<R> for D {}

/// Kernels as register methods, dispatched through the process-wide dispatcher.
///
/// ```
/// use lanemath::prelude::*;
///
/// let a = F32x4::new(1.0, 2.0, 3.0, 0.0);
/// let b = F32x4::new(4.0, 5.0, 6.0, 0.0);
/// assert_eq!(a.dot3d(b).x(), 32.0);
/// ```
pub trait VectorMath: SimdRegister {
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, low: Self, high: Self) -> Self;
    fn round(self) -> Self;
    fn floor(self) -> Self;
    fn truncate(self) -> Self;

    fn compare_eq(self, other: Self) -> LaneMask<Self::Scalar>;
    fn compare_lt(self, other: Self) -> LaneMask<Self::Scalar>;
    fn compare_gt(self, other: Self) -> LaneMask<Self::Scalar>;
    fn select(mask: LaneMask<Self::Scalar>, if_true: Self, if_false: Self) -> Self;

    fn mul_add(self, multiplier: Self, addend: Self) -> Self;

    fn dot2d(self, other: Self) -> Self;
    fn dot3d(self, other: Self) -> Self;
    fn dot4d(self, other: Self) -> Self;
    fn cross2d(self, other: Self) -> Self;
    fn cross3d(self, other: Self) -> Self;
    fn cross4d(self, two: Self, three: Self) -> Self;
    fn length2d(self) -> Self;
    fn length3d(self) -> Self;
    fn length4d(self) -> Self;
    fn normalize2d(self) -> Self;
    fn normalize3d(self) -> Self;
    fn normalize4d(self) -> Self;
    fn lerp(self, to: Self, weight: Self::Scalar) -> Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn tan(self) -> Self;
}

impl<R> VectorMath for R
where
    R: SimdRegister,
    Dispatcher: Kernels<R>,
{
    #[inline]
    fn abs(self) -> Self {
        Dispatcher::global().abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Dispatcher::global().sqrt(self)
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        Dispatcher::global().min(self, other)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Dispatcher::global().max(self, other)
    }

    #[inline]
    fn clamp(self, low: Self, high: Self) -> Self {
        Dispatcher::global().clamp(self, low, high)
    }

    #[inline]
    fn round(self) -> Self {
        Dispatcher::global().round(self)
    }

    #[inline]
    fn floor(self) -> Self {
        Dispatcher::global().floor(self)
    }

    #[inline]
    fn truncate(self) -> Self {
        Dispatcher::global().truncate(self)
    }

    #[inline]
    fn compare_eq(self, other: Self) -> LaneMask<Self::Scalar> {
        Dispatcher::global().compare_eq(self, other)
    }

    #[inline]
    fn compare_lt(self, other: Self) -> LaneMask<Self::Scalar> {
        Dispatcher::global().compare_lt(self, other)
    }

    #[inline]
    fn compare_gt(self, other: Self) -> LaneMask<Self::Scalar> {
        Dispatcher::global().compare_gt(self, other)
    }

    #[inline]
    fn select(mask: LaneMask<Self::Scalar>, if_true: Self, if_false: Self) -> Self {
        Dispatcher::global().select(mask, if_true, if_false)
    }

    #[inline]
    fn mul_add(self, multiplier: Self, addend: Self) -> Self {
        Dispatcher::global().fused_multiply_add(self, multiplier, addend)
    }

    #[inline]
    fn dot2d(self, other: Self) -> Self {
        Dispatcher::global().dot2d(self, other)
    }

    #[inline]
    fn dot3d(self, other: Self) -> Self {
        Dispatcher::global().dot3d(self, other)
    }

    #[inline]
    fn dot4d(self, other: Self) -> Self {
        Dispatcher::global().dot4d(self, other)
    }

    #[inline]
    fn cross2d(self, other: Self) -> Self {
        Dispatcher::global().cross2d(self, other)
    }

    #[inline]
    fn cross3d(self, other: Self) -> Self {
        Dispatcher::global().cross3d(self, other)
    }

    #[inline]
    fn cross4d(self, two: Self, three: Self) -> Self {
        Dispatcher::global().cross4d(self, two, three)
    }

    #[inline]
    fn length2d(self) -> Self {
        Dispatcher::global().length2d(self)
    }

    #[inline]
    fn length3d(self) -> Self {
        Dispatcher::global().length3d(self)
    }

    #[inline]
    fn length4d(self) -> Self {
        Dispatcher::global().length4d(self)
    }

    #[inline]
    fn normalize2d(self) -> Self {
        Dispatcher::global().normalize2d(self)
    }

    #[inline]
    fn normalize3d(self) -> Self {
        Dispatcher::global().normalize3d(self)
    }

    #[inline]
    fn normalize4d(self) -> Self {
        Dispatcher::global().normalize4d(self)
    }

    #[inline]
    fn lerp(self, to: Self, weight: Self::Scalar) -> Self {
        Dispatcher::global().lerp_scalar(self, to, weight)
    }

    #[inline]
    fn sin(self) -> Self {
        Dispatcher::global().sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        Dispatcher::global().cos(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        Dispatcher::global().sin_cos(self)
    }

    #[inline]
    fn tan(self) -> Self {
        Dispatcher::global().tan(self)
    }
}
