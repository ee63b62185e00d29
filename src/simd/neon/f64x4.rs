use std::arch::aarch64::*;

use crate::simd::mask::{Lanes, Mask64x4};
use crate::simd::traits::SimdRegister;
use crate::simd::F64x4;

/// X and Y in `lo`, Z and W in `hi`.
#[derive(Copy, Clone)]
struct Pair {
    lo: float64x2_t,
    hi: float64x2_t,
}

#[derive(Copy, Clone)]
struct MaskPair {
    lo: uint64x2_t,
    hi: uint64x2_t,
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn load(value: F64x4) -> Pair {
    let ptr = value.as_ptr();
    Pair {
        lo: vld1q_f64(ptr),
        hi: vld1q_f64(ptr.add(2)),
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store(value: Pair) -> F64x4 {
    let mut out = F64x4::default();
    let ptr = out.as_mut_ptr();
    vst1q_f64(ptr, value.lo);
    vst1q_f64(ptr.add(2), value.hi);
    out
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn load_bits(value: F64x4) -> MaskPair {
    let v = load(value);
    MaskPair {
        lo: vreinterpretq_u64_f64(v.lo),
        hi: vreinterpretq_u64_f64(v.hi),
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store_bits(value: MaskPair) -> F64x4 {
    store(Pair {
        lo: vreinterpretq_f64_u64(value.lo),
        hi: vreinterpretq_f64_u64(value.hi),
    })
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store_mask(value: MaskPair) -> Mask64x4 {
    let mut bits = [0u64; 4];
    let ptr = bits.as_mut_ptr();
    vst1q_u64(ptr, value.lo);
    vst1q_u64(ptr.add(2), value.hi);
    Mask64x4::from_bits_unchecked(bits)
}

/// Applies a two operand NEON intrinsic to both halves.
macro_rules! pairs {
    ($intrinsic:ident, $left:expr, $right:expr) => {
        Pair {
            lo: $intrinsic($left.lo, $right.lo),
            hi: $intrinsic($left.hi, $right.hi),
        }
    };
    (bits $intrinsic:ident, $left:expr, $right:expr) => {
        MaskPair {
            lo: $intrinsic($left.lo, $right.lo),
            hi: $intrinsic($left.hi, $right.hi),
        }
    };
    (unary $intrinsic:ident, $value:expr) => {
        Pair {
            lo: $intrinsic($value.lo),
            hi: $intrinsic($value.hi),
        }
    };
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn add(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(pairs!(vaddq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn subtract(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(pairs!(vsubq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn multiply(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(pairs!(vmulq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn divide(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(pairs!(vdivq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn sqrt(value: F64x4) -> F64x4 {
    let v = load(value);
    store(pairs!(unary vsqrtq_f64, v))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn min(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(Pair {
        lo: vbslq_f64(vcltq_f64(l.lo, r.lo), l.lo, r.lo),
        hi: vbslq_f64(vcltq_f64(l.hi, r.hi), l.hi, r.hi),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn max(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(Pair {
        lo: vbslq_f64(vcgtq_f64(l.lo, r.lo), l.lo, r.lo),
        hi: vbslq_f64(vcgtq_f64(l.hi, r.hi), l.hi, r.hi),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn horizontal_add(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(Pair {
        lo: vpaddq_f64(l.lo, l.hi),
        hi: vpaddq_f64(r.lo, r.hi),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn round(value: F64x4) -> F64x4 {
    let v = load(value);
    store(pairs!(unary vrndnq_f64, v))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn floor(value: F64x4) -> F64x4 {
    let v = load(value);
    store(pairs!(unary vrndmq_f64, v))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn truncate(value: F64x4) -> F64x4 {
    let v = load(value);
    store(pairs!(unary vrndq_f64, v))
}

// ================================================================================================
// BITWISE
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn and(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load_bits(left), load_bits(right));
    store_bits(pairs!(bits vandq_u64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn or(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load_bits(left), load_bits(right));
    store_bits(pairs!(bits vorrq_u64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn xor(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load_bits(left), load_bits(right));
    store_bits(pairs!(bits veorq_u64, l, r))
}

/// `!left & right`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn and_not(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load_bits(left), load_bits(right));
    store_bits(pairs!(bits vbicq_u64, r, l))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn not(value: F64x4) -> F64x4 {
    let ones = vdupq_n_u64(u64::MAX);
    let v = load_bits(value);
    store_bits(MaskPair {
        lo: veorq_u64(v.lo, ones),
        hi: veorq_u64(v.hi, ones),
    })
}

// ================================================================================================
// COMPARISON
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_eq(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    store_mask(pairs!(bits vceqq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_ne(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    let ones = vdupq_n_u64(u64::MAX);
    let eq = pairs!(bits vceqq_f64, l, r);
    store_mask(MaskPair {
        lo: veorq_u64(eq.lo, ones),
        hi: veorq_u64(eq.hi, ones),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_gt(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    store_mask(pairs!(bits vcgtq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_lt(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    store_mask(pairs!(bits vcltq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_ge(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    store_mask(pairs!(bits vcgeq_f64, l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_le(left: F64x4, right: F64x4) -> Mask64x4 {
    let (l, r) = (load(left), load(right));
    store_mask(pairs!(bits vcleq_f64, l, r))
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn dot(left: F64x4, right: F64x4, lanes: Lanes) -> F64x4 {
    let products = load_bits(multiply(left, right));
    let mask = load_bits(F64x4::active_lanes(lanes));
    let masked = pairs!(bits vandq_u64, products, mask);

    let sum = vaddvq_f64(vreinterpretq_f64_u64(masked.lo))
        + vaddvq_f64(vreinterpretq_f64_u64(masked.hi));
    let broadcast = vdupq_n_f64(sum);
    store(Pair {
        lo: broadcast,
        hi: broadcast,
    })
}

// ================================================================================================
// FUSED
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_add(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    let (x, y, z) = (load(x), load(y), load(z));
    store(Pair {
        lo: vfmaq_f64(z.lo, x.lo, y.lo),
        hi: vfmaq_f64(z.hi, x.hi, y.hi),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_subtract(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    let (x, y, z) = (load(x), load(y), load(z));
    store(Pair {
        lo: vfmaq_f64(vnegq_f64(z.lo), x.lo, y.lo),
        hi: vfmaq_f64(vnegq_f64(z.hi), x.hi, y.hi),
    })
}

/// `-(x * y) + z`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_negate_multiply_add(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    let (x, y, z) = (load(x), load(y), load(z));
    store(Pair {
        lo: vfmsq_f64(z.lo, x.lo, y.lo),
        hi: vfmsq_f64(z.hi, x.hi, y.hi),
    })
}

/// `-(x * y) - z`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_negate_multiply_subtract(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    let (x, y, z) = (load(x), load(y), load(z));
    store(Pair {
        lo: vnegq_f64(vfmaq_f64(z.lo, x.lo, y.lo)),
        hi: vnegq_f64(vfmaq_f64(z.hi, x.hi, y.hi)),
    })
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_add_subtract_alternating(
    x: F64x4,
    y: F64x4,
    z: F64x4,
) -> F64x4 {
    fused_multiply_add(x, y, xor(z, F64x4::sign_mask_in(Lanes::X | Lanes::Z)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_subtract_add_alternating(
    x: F64x4,
    y: F64x4,
    z: F64x4,
) -> F64x4 {
    fused_multiply_add(x, y, xor(z, F64x4::sign_mask_in(Lanes::Y | Lanes::W)))
}
