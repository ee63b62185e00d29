#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::mask::{Lanes, Mask64x4};
use crate::simd::traits::SimdRegister;
use crate::simd::F64x4;

const NEAREST: i32 = _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC;
const DOWN: i32 = _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC;
const TOWARD_ZERO: i32 = _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC;

/// X and Y in `lo`, Z and W in `hi`.
#[derive(Copy, Clone)]
struct Halves {
    lo: __m128d,
    hi: __m128d,
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(value: F64x4) -> Halves {
    let ptr = value.as_ptr();
    Halves {
        lo: _mm_load_pd(ptr),
        hi: _mm_load_pd(ptr.add(2)),
    }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store(value: Halves) -> F64x4 {
    let mut out = F64x4::default();
    let ptr = out.as_mut_ptr();
    _mm_store_pd(ptr, value.lo);
    _mm_store_pd(ptr.add(2), value.hi);
    out
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store_mask(value: Halves) -> Mask64x4 {
    let mut bits = [0u64; 4];
    let ptr = bits.as_mut_ptr().cast::<f64>();
    _mm_storeu_pd(ptr, value.lo);
    _mm_storeu_pd(ptr.add(2), value.hi);
    Mask64x4::from_bits_unchecked(bits)
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn lane_mask(lanes: Lanes) -> Halves {
    load(F64x4::from_bits(Mask64x4::from_lanes(lanes).to_bits()))
}

/// Applies a two operand `__m128d` intrinsic to both halves.
macro_rules! halves {
    ($intrinsic:ident, $left:expr, $right:expr) => {{
        let (l, r) = (load($left), load($right));
        Halves {
            lo: $intrinsic(l.lo, r.lo),
            hi: $intrinsic(l.hi, r.hi),
        }
    }};
    ($intrinsic:ident :: <$imm:ident>, $value:expr) => {{
        let v = load($value);
        Halves {
            lo: $intrinsic::<$imm>(v.lo),
            hi: $intrinsic::<$imm>(v.hi),
        }
    }};
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn add(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_add_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn subtract(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_sub_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn multiply(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_mul_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn divide(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_div_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sqrt(value: F64x4) -> F64x4 {
    let v = load(value);
    store(Halves {
        lo: _mm_sqrt_pd(v.lo),
        hi: _mm_sqrt_pd(v.hi),
    })
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn min(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_min_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn max(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_max_pd, left, right))
}

/// `hadd` pairs within each operand: X and Y of the result come from `left`.
#[inline]
#[target_feature(enable = "sse3")]
pub(crate) unsafe fn horizontal_add(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    store(Halves {
        lo: _mm_hadd_pd(l.lo, l.hi),
        hi: _mm_hadd_pd(r.lo, r.hi),
    })
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn round(value: F64x4) -> F64x4 {
    store(halves!(_mm_round_pd::<NEAREST>, value))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn floor(value: F64x4) -> F64x4 {
    store(halves!(_mm_round_pd::<DOWN>, value))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn truncate(value: F64x4) -> F64x4 {
    store(halves!(_mm_round_pd::<TOWARD_ZERO>, value))
}

// ================================================================================================
// BITWISE
// ================================================================================================

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn and(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_and_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn or(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_or_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn xor(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_xor_pd, left, right))
}

/// `!left & right`
#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn and_not(left: F64x4, right: F64x4) -> F64x4 {
    store(halves!(_mm_andnot_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn not(value: F64x4) -> F64x4 {
    let (v, ones) = (load(value), lane_mask(Lanes::XYZW));
    store(Halves {
        lo: _mm_xor_pd(v.lo, ones.lo),
        hi: _mm_xor_pd(v.hi, ones.hi),
    })
}

// ================================================================================================
// COMPARISON
// ================================================================================================

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_eq(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmpeq_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_ne(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmpneq_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_gt(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmpgt_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_lt(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmplt_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_ge(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmpge_pd, left, right))
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare_le(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(halves!(_mm_cmple_pd, left, right))
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn dot(left: F64x4, right: F64x4, lanes: Lanes) -> F64x4 {
    let (l, r, mask) = (load(left), load(right), lane_mask(lanes));
    let lo = _mm_and_pd(_mm_mul_pd(l.lo, r.lo), mask.lo);
    let hi = _mm_and_pd(_mm_mul_pd(l.hi, r.hi), mask.hi);

    let xy = _mm_add_sd(lo, _mm_unpackhi_pd(lo, lo));
    let zw = _mm_add_sd(hi, _mm_unpackhi_pd(hi, hi));
    let sum = _mm_add_sd(xy, zw);

    let broadcast = _mm_unpacklo_pd(sum, sum);
    store(Halves {
        lo: broadcast,
        hi: broadcast,
    })
}

#[inline]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn cross2d(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));
    // (y2, x2)
    let swapped = _mm_shuffle_pd::<0b01>(r.lo, r.lo);
    let products = _mm_mul_pd(l.lo, swapped);
    let cross = _mm_sub_sd(products, _mm_unpackhi_pd(products, products));

    let broadcast = _mm_unpacklo_pd(cross, cross);
    store(Halves {
        lo: broadcast,
        hi: broadcast,
    })
}
