//! Raw bit pattern operations, the primitives under masking and sign
//! manipulation.

#[cfg(arm_simd)]
use crate::simd::neon;
#[cfg(x86_simd)]
use crate::simd::{avx, sse};

use crate::simd::dispatch::dispatch;
use crate::simd::{scalar, Dispatcher, ElementKind, F32x4, F64x4, Operation, SimdRegister};

/// Lane-wise bit operations. The element type of the register is ignored.
pub trait Bitwise<R: SimdRegister> {
    fn and(&self, left: R, right: R) -> R;

    fn or(&self, left: R, right: R) -> R;

    fn xor(&self, left: R, right: R) -> R;

    /// `!left & right`, the operand order of `andnot` instructions.
    fn and_not(&self, left: R, right: R) -> R;

    fn not(&self, value: R) -> R;
}

impl Bitwise<F32x4> for Dispatcher {
    #[inline]
    fn and(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::and(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::and(left, right),
            _ => scalar::and(left, right),
        )
    }

    #[inline]
    fn or(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::or(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::or(left, right),
            _ => scalar::or(left, right),
        )
    }

    #[inline]
    fn xor(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::xor(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::xor(left, right),
            _ => scalar::xor(left, right),
        )
    }

    #[inline]
    fn and_not(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::and_not(left, right),
            #[cfg(arm_simd)] Neon => neon::f32x4::and_not(left, right),
            _ => scalar::and_not(left, right),
        )
    }

    #[inline]
    fn not(&self, value: F32x4) -> F32x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::not(value),
            #[cfg(arm_simd)] Neon => neon::f32x4::not(value),
            _ => scalar::not(value),
        )
    }
}

impl Bitwise<F64x4> for Dispatcher {
    #[inline]
    fn and(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::and(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::and(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::and(left, right),
            _ => scalar::and(left, right),
        )
    }

    #[inline]
    fn or(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::or(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::or(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::or(left, right),
            _ => scalar::or(left, right),
        )
    }

    #[inline]
    fn xor(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::xor(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::xor(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::xor(left, right),
            _ => scalar::xor(left, right),
        )
    }

    #[inline]
    fn and_not(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::and_not(left, right),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::and_not(left, right),
            #[cfg(arm_simd)] Neon => neon::f64x4::and_not(left, right),
            _ => scalar::and_not(left, right),
        )
    }

    #[inline]
    fn not(&self, value: F64x4) -> F64x4 {
        dispatch!(self, Operation::Bitwise, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::not(value),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::not(value),
            #[cfg(arm_simd)] Neon => neon::f64x4::not(value),
            _ => scalar::not(value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MathOptions;

    fn dispatchers() -> Vec<Dispatcher> {
        Dispatcher::default().ladder()
    }

    #[test]
    fn and_not_complements_the_left_operand() {
        let sign = F32x4::sign_mask();
        let v = F32x4::new(-1.0, 2.0, -0.0, f32::NEG_INFINITY);

        for d in dispatchers() {
            assert_eq!(d.and_not(sign, v).to_array(), [1.0, 2.0, 0.0, f32::INFINITY]);
            assert_eq!(d.and(sign, v).to_bits(), [0x8000_0000, 0, 0x8000_0000, 0x8000_0000]);
        }
    }

    #[test]
    fn not_flips_every_bit_including_nan_lanes() {
        let v = F64x4::new(f64::NAN, 0.0, -1.0, 1.5);
        let expected = v.to_bits().map(|lane| !lane);

        for d in dispatchers() {
            assert_eq!(d.not(v).to_bits(), expected, "{:?}", d.capabilities());
        }
    }

    #[test]
    fn xor_with_itself_is_zero() {
        let d = Dispatcher::scalar(MathOptions::default());
        let v = F64x4::new(3.0, -7.25, f64::MAX, f64::MIN_POSITIVE);
        assert_eq!(d.xor(v, v).to_bits(), [0; 4]);
        assert_eq!(d.or(v, F64x4::zero()), v);
    }
}
