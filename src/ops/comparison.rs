//! Lane comparisons producing canonical masks, and mask driven selection.
//!
//! Every comparison yields a [`LaneMask`] whose lanes are all ones or all
//! zeros. Ordered comparisons (`eq`, `gt`, `lt`, `ge`, `le`) are false for
//! NaN lanes, `ne` is true for them.

#[cfg(arm_simd)]
use crate::simd::neon;
#[cfg(x86_simd)]
use crate::simd::{avx, sse};

use num::Float;

use crate::ops::Bitwise;
use crate::simd::dispatch::dispatch;
use crate::simd::mask::LaneMask;
use crate::simd::{
    scalar, Dispatcher, ElementKind, F32x4, F64x4, Mask32x4, Mask64x4, Operation, SimdRegister,
};

pub trait Comparison<R: SimdRegister>: Bitwise<R> {
    fn compare_eq(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    fn compare_ne(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    fn compare_gt(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    fn compare_lt(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    fn compare_ge(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    fn compare_le(&self, left: R, right: R) -> LaneMask<R::Scalar>;

    /// Lanes of `if_true` where `mask` is set, lanes of `if_false` elsewhere.
    #[inline]
    fn select(&self, mask: LaneMask<R::Scalar>, if_true: R, if_false: R) -> R {
        let mask = R::from_bits(mask.to_bits());
        self.or(self.and(mask, if_true), self.and_not(mask, if_false))
    }

    /// `-bounds <= value <= bounds` per lane.
    #[inline]
    fn in_bounds(&self, value: R, bounds: R) -> LaneMask<R::Scalar> {
        let low = self.xor(bounds, R::sign_mask());
        self.compare_le(value, bounds) & self.compare_ge(value, low)
    }

    #[inline]
    fn is_nan(&self, value: R) -> LaneMask<R::Scalar> {
        self.compare_ne(value, value)
    }

    #[inline]
    fn is_infinite(&self, value: R) -> LaneMask<R::Scalar> {
        let magnitude = self.and_not(R::sign_mask(), value);
        self.compare_eq(magnitude, R::splat(R::Scalar::infinity()))
    }

    /// Neither infinite nor NaN.
    #[inline]
    fn is_finite(&self, value: R) -> LaneMask<R::Scalar> {
        let magnitude = self.and_not(R::sign_mask(), value);
        self.compare_lt(magnitude, R::splat(R::Scalar::infinity()))
    }
}

impl Comparison<F32x4> for Dispatcher {
    #[inline]
    fn compare_eq(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_eq(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_eq(left, right),
            _ => scalar::compare_eq(left, right),
        )
    }

    #[inline]
    fn compare_ne(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_ne(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_ne(left, right),
            _ => scalar::compare_ne(left, right),
        )
    }

    #[inline]
    fn compare_gt(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_gt(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_gt(left, right),
            _ => scalar::compare_gt(left, right),
        )
    }

    #[inline]
    fn compare_lt(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_lt(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_lt(left, right),
            _ => scalar::compare_lt(left, right),
        )
    }

    #[inline]
    fn compare_ge(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_ge(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_ge(left, right),
            _ => scalar::compare_ge(left, right),
        )
    }

    #[inline]
    fn compare_le(&self, left: F32x4, right: F32x4) -> Mask32x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::compare_le(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::compare_le(left, right),
            _ => scalar::compare_le(left, right),
        )
    }
}

impl Comparison<F64x4> for Dispatcher {
    #[inline]
    fn compare_eq(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_eq(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_eq(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_eq(left, right),
            _ => scalar::compare_eq(left, right),
        )
    }

    #[inline]
    fn compare_ne(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_ne(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_ne(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_ne(left, right),
            _ => scalar::compare_ne(left, right),
        )
    }

    #[inline]
    fn compare_gt(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_gt(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_gt(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_gt(left, right),
            _ => scalar::compare_gt(left, right),
        )
    }

    #[inline]
    fn compare_lt(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_lt(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_lt(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_lt(left, right),
            _ => scalar::compare_lt(left, right),
        )
    }

    #[inline]
    fn compare_ge(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_ge(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_ge(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_ge(left, right),
            _ => scalar::compare_ge(left, right),
        )
    }

    #[inline]
    fn compare_le(&self, left: F64x4, right: F64x4) -> Mask64x4 {
        dispatch!(self, Operation::Comparison, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::compare_le(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::compare_le(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::compare_le(left, right),
            _ => scalar::compare_le(left, right),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Lanes;

    #[test]
    fn compare_eq_with_itself_is_all_true_without_nan() {
        for d in Dispatcher::default().ladder() {
            let v = F32x4::new(0.0, -1.0, f32::INFINITY, f32::MAX);
            let mask = d.compare_eq(v, v);
            assert!(mask.all_true());
            assert!(!mask.are_mixed());

            let with_nan = v.with_lane(1, f32::NAN);
            let mask = d.compare_eq(with_nan, with_nan);
            assert!(!mask.all_true());
            assert!(mask.any_false());
            assert!(mask.lane_false(1));
            assert!(mask.are_mixed());
        }
    }

    #[test]
    fn masks_are_canonical_on_every_tier() {
        let a = F64x4::new(1.0, f64::NAN, 3.0, -0.0);
        let b = F64x4::new(2.0, 1.0, 3.0, 0.0);

        for d in Dispatcher::default().ladder() {
            for mask in [
                d.compare_eq(a, b),
                d.compare_ne(a, b),
                d.compare_gt(a, b),
                d.compare_lt(a, b),
                d.compare_ge(a, b),
                d.compare_le(a, b),
            ] {
                assert!(mask
                    .to_bits()
                    .iter()
                    .all(|&lane| lane == 0 || lane == u64::MAX));
            }

            assert_eq!(d.compare_ne(a, b).to_bools(), [true, true, false, false]);
            assert_eq!(d.compare_le(a, b).to_bools(), [true, false, true, true]);
        }
    }

    #[test]
    fn select_picks_lanes_by_mask() {
        let d = Dispatcher::default();
        let mask = Mask32x4::from_bools([true, false, false, true]);
        let picked = d.select(mask, F32x4::splat(1.0), F32x4::splat(2.0));
        assert_eq!(picked.to_array(), [1.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn classification() {
        let d = Dispatcher::default();
        let v = F32x4::new(f32::NAN, f32::NEG_INFINITY, -3.5, 0.0);

        assert_eq!(d.is_nan(v).to_bools(), [true, false, false, false]);
        assert_eq!(d.is_infinite(v).to_bools(), [false, true, false, false]);
        assert_eq!(d.is_finite(v).to_bools(), [false, false, true, true]);
    }

    #[test]
    fn in_bounds_is_inclusive() {
        let d = Dispatcher::default();
        let v = F64x4::new(-2.0, -1.0, 1.0, 1.5);
        let mask = d.in_bounds(v, F64x4::splat(1.0));

        assert_eq!(mask.to_bools(), [false, true, true, false]);
        assert!(mask.all_true_in(Lanes::Y | Lanes::Z));
        assert!(mask.any_false_in(Lanes::XY));
    }
}
