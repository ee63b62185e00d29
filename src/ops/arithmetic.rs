//! Lane-wise arithmetic with IEEE-754 semantics.
//!
//! `min` and `max` follow the x86 instructions rather than `f32::min`: when
//! either lane is NaN the lane of the *second* operand is returned, and
//! `min(0.0, -0.0)` is `-0.0` while `min(-0.0, 0.0)` is `0.0`. Every tier,
//! the scalar one included, reproduces this.

#[cfg(arm_simd)]
use crate::simd::neon;
#[cfg(x86_simd)]
use crate::simd::{avx, sse};

use crate::ops::Comparison;
use crate::simd::dispatch::dispatch;
use crate::simd::{scalar, Dispatcher, ElementKind, F32x4, F64x4, Lanes, Operation, SimdRegister};

pub trait Arithmetic<R: SimdRegister>: Comparison<R> {
    fn add(&self, left: R, right: R) -> R;

    fn subtract(&self, left: R, right: R) -> R;

    fn multiply(&self, left: R, right: R) -> R;

    fn divide(&self, left: R, right: R) -> R;

    fn sqrt(&self, value: R) -> R;

    /// `left < right ? left : right`
    fn min(&self, left: R, right: R) -> R;

    /// `left > right ? left : right`
    fn max(&self, left: R, right: R) -> R;

    /// `(l0 + l1, l2 + l3, r0 + r1, r2 + r3)`
    fn horizontal_add(&self, left: R, right: R) -> R;

    /// Nearest integer, ties to even.
    fn round(&self, value: R) -> R;

    fn floor(&self, value: R) -> R;

    fn truncate(&self, value: R) -> R;

    /// `max(0 - value, value)`. NaN lanes stay NaN.
    #[inline]
    fn abs(&self, value: R) -> R {
        self.max(self.subtract(R::zero(), value), value)
    }

    /// Flips the sign bit of every lane.
    #[inline]
    fn negate(&self, value: R) -> R {
        self.xor(value, R::sign_mask())
    }

    /// Flips the sign of X and Y, leaving Z and W untouched.
    #[inline]
    fn negate2d(&self, value: R) -> R {
        self.xor(value, R::sign_mask_in(Lanes::XY))
    }

    /// Flips the sign of X, Y and Z, leaving W untouched.
    #[inline]
    fn negate3d(&self, value: R) -> R {
        self.xor(value, R::sign_mask_in(Lanes::XYZ))
    }

    #[inline]
    fn negate4d(&self, value: R) -> R {
        self.negate(value)
    }

    /// `max(min(value, high), low)`
    #[inline]
    fn clamp(&self, value: R, low: R, high: R) -> R {
        self.max(self.min(value, high), low)
    }

    #[inline]
    fn square(&self, value: R) -> R {
        self.multiply(value, value)
    }

    #[inline]
    fn reciprocal(&self, value: R) -> R {
        self.divide(R::constant(1.0), value)
    }

    #[inline]
    fn reciprocal_sqrt(&self, value: R) -> R {
        self.divide(R::constant(1.0), self.sqrt(value))
    }

    /// `left - trunc(left / right) * right`, the sign follows `left`.
    #[inline]
    fn remainder(&self, left: R, right: R) -> R {
        let quotient = self.truncate(self.divide(left, right));
        self.subtract(left, self.multiply(quotient, right))
    }

    /// Magnitude of `magnitude` with the sign of `sign`.
    #[inline]
    fn copy_sign(&self, magnitude: R, sign: R) -> R {
        let mask = R::sign_mask();
        self.or(self.and_not(mask, magnitude), self.and(mask, sign))
    }
}

impl Arithmetic<F32x4> for Dispatcher {
    #[inline]
    fn add(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::add(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::add(left, right),
            _ => scalar::add(left, right),
        )
    }

    #[inline]
    fn subtract(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::subtract(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::subtract(left, right),
            _ => scalar::subtract(left, right),
        )
    }

    #[inline]
    fn multiply(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::multiply(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::multiply(left, right),
            _ => scalar::multiply(left, right),
        )
    }

    #[inline]
    fn divide(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::divide(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::divide(left, right),
            _ => scalar::divide(left, right),
        )
    }

    #[inline]
    fn sqrt(&self, value: F32x4) -> F32x4 {
        dispatch!(self, Operation::SquareRoot, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::sqrt(value),
            #[cfg(arm_simd)] Neon => neon::f32x4::sqrt(value),
            _ => scalar::sqrt(value),
        )
    }

    #[inline]
    fn min(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::MinMax, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::min(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::min(left, right),
            _ => scalar::min(left, right),
        )
    }

    #[inline]
    fn max(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::MinMax, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::max(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::max(left, right),
            _ => scalar::max(left, right),
        )
    }

    #[inline]
    fn horizontal_add(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::HorizontalAdd, ElementKind::F32;
            #[cfg(x86_simd)] Sse3 => sse::f32x4::horizontal_add(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::horizontal_add(left, right),
            _ => scalar::horizontal_add(left, right),
        )
    }

    #[inline]
    fn round(&self, value: F32x4) -> F32x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::round(value),
            #[cfg(arm_simd)] Neon => neon::f32x4::round(value),
            _ => scalar::round(value),
        )
    }

    #[inline]
    fn floor(&self, value: F32x4) -> F32x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::floor(value),
            #[cfg(arm_simd)] Neon => neon::f32x4::floor(value),
            _ => scalar::floor(value),
        )
    }

    #[inline]
    fn truncate(&self, value: F32x4) -> F32x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::truncate(value),
            #[cfg(arm_simd)] Neon => neon::f32x4::truncate(value),
            _ => scalar::truncate(value),
        )
    }
}

impl Arithmetic<F64x4> for Dispatcher {
    #[inline]
    fn add(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::add(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::add(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::add(left, right),
            _ => scalar::add(left, right),
        )
    }

    #[inline]
    fn subtract(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::subtract(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::subtract(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::subtract(left, right),
            _ => scalar::subtract(left, right),
        )
    }

    #[inline]
    fn multiply(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::multiply(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::multiply(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::multiply(left, right),
            _ => scalar::multiply(left, right),
        )
    }

    #[inline]
    fn divide(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Arithmetic, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::divide(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::divide(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::divide(left, right),
            _ => scalar::divide(left, right),
        )
    }

    #[inline]
    fn sqrt(&self, value: F64x4) -> F64x4 {
        dispatch!(self, Operation::SquareRoot, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::sqrt(value),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::sqrt(value),
            #[cfg(arm_simd)] Neon => neon::f64x4::sqrt(value),
            _ => scalar::sqrt(value),
        )
    }

    #[inline]
    fn min(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::MinMax, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::min(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::min(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::min(left, right),
            _ => scalar::min(left, right),
        )
    }

    #[inline]
    fn max(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::MinMax, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::max(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::max(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::max(left, right),
            _ => scalar::max(left, right),
        )
    }

    #[inline]
    fn horizontal_add(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::HorizontalAdd, ElementKind::F64;
            #[cfg(x86_simd)] Sse3 => sse::f64x4::horizontal_add(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::horizontal_add(left, right),
            _ => scalar::horizontal_add(left, right),
        )
    }

    #[inline]
    fn round(&self, value: F64x4) -> F64x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::round(value),
            #[cfg(x86_simd)] Sse41 => sse::f64x4::round(value),
            #[cfg(arm_simd)] Neon => neon::f64x4::round(value),
            _ => scalar::round(value),
        )
    }

    #[inline]
    fn floor(&self, value: F64x4) -> F64x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::floor(value),
            #[cfg(x86_simd)] Sse41 => sse::f64x4::floor(value),
            #[cfg(arm_simd)] Neon => neon::f64x4::floor(value),
            _ => scalar::floor(value),
        )
    }

    #[inline]
    fn truncate(&self, value: F64x4) -> F64x4 {
        dispatch!(self, Operation::Rounding, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::truncate(value),
            #[cfg(x86_simd)] Sse41 => sse::f64x4::truncate(value),
            #[cfg(arm_simd)] Neon => neon::f64x4::truncate(value),
            _ => scalar::truncate(value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_tests {
        use super::*;

        #[test]
        fn test_clamp_scenario() {
            let d = Dispatcher::default();
            let clamped = d.clamp(F32x4::splat(5.0), F32x4::splat(0.0), F32x4::splat(3.0));
            assert_eq!(clamped.to_array(), [3.0; 4]);
        }

        #[test]
        fn test_abs() {
            for d in Dispatcher::default().ladder() {
                let v = F64x4::new(-2.5, 0.0, f64::NEG_INFINITY, f64::NAN);
                let abs = d.abs(v).to_array();

                assert_eq!(&abs[..3], &[2.5, 0.0, f64::INFINITY]);
                assert!(abs[3].is_nan());
            }
        }

        #[test]
        fn test_negate_variants_leave_high_lanes() {
            let d = Dispatcher::default();
            let v = F32x4::new(1.0, 2.0, 3.0, 4.0);

            assert_eq!(d.negate2d(v).to_array(), [-1.0, -2.0, 3.0, 4.0]);
            assert_eq!(d.negate3d(v).to_array(), [-1.0, -2.0, -3.0, 4.0]);
            assert_eq!(d.negate4d(v).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        }

        #[test]
        fn test_remainder_and_copy_sign() {
            let d = Dispatcher::default();
            let r = d.remainder(F64x4::new(7.5, -7.5, 1.0, 9.0), F64x4::splat(2.0));
            assert_eq!(r.to_array(), [1.5, -1.5, 1.0, 1.0]);

            let signed = d.copy_sign(F32x4::splat(3.0), F32x4::new(-1.0, 1.0, -0.0, 0.0));
            assert_eq!(signed.to_array(), [-3.0, 3.0, -3.0, 3.0]);
        }

        #[test]
        fn test_reciprocals() {
            let d = Dispatcher::default();
            assert_eq!(d.reciprocal(F32x4::splat(4.0)).to_array(), [0.25; 4]);
            assert_eq!(d.reciprocal_sqrt(F64x4::splat(16.0)).to_array(), [0.25; 4]);
            assert_eq!(d.square(F64x4::splat(-3.0)).to_array(), [9.0; 4]);
        }

        #[test]
        fn test_division_by_zero_is_not_an_error() {
            let d = Dispatcher::default();
            let q = d.divide(F32x4::new(1.0, -1.0, 0.0, 2.0), F32x4::zero()).to_array();
            assert_eq!(q[0], f32::INFINITY);
            assert_eq!(q[1], f32::NEG_INFINITY);
            assert!(q[2].is_nan());
        }
    }

    mod tier_tests {
        use super::*;

        #[test]
        fn test_min_max_nan_asymmetry_on_every_tier() {
            let a = F32x4::new(f32::NAN, 1.0, 0.0, -0.0);
            let b = F32x4::new(1.0, f32::NAN, -0.0, 0.0);

            for d in Dispatcher::default().ladder() {
                let min = d.min(a, b).to_bits();
                let max = d.max(a, b).to_bits();
                assert_eq!(min, b.to_bits(), "{:?}", d.capabilities());
                assert_eq!(max, b.to_bits(), "{:?}", d.capabilities());
            }
        }

        #[test]
        fn test_horizontal_add_pairs_on_every_tier() {
            let l = F64x4::new(1.0, 2.0, 3.0, 4.0);
            let r = F64x4::new(10.0, 20.0, 30.0, 40.0);

            for d in Dispatcher::default().ladder() {
                assert_eq!(d.horizontal_add(l, r).to_array(), [3.0, 7.0, 30.0, 70.0]);
            }
        }

        #[test]
        fn test_rounding_on_every_tier() {
            let v = F32x4::new(0.5, 1.5, -2.5, -0.7);

            for d in Dispatcher::default().ladder() {
                assert_eq!(d.round(v).to_array(), [0.0, 2.0, -2.0, -1.0]);
                assert_eq!(d.floor(v).to_array(), [0.0, 1.0, -3.0, -1.0]);
                assert_eq!(d.truncate(v).to_array(), [0.0, 1.0, -2.0, 0.0]);
            }
        }
    }
}
