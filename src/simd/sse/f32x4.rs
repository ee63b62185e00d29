#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::mask::{Lanes, Mask32x4};
use crate::simd::sse::shuffle;
use crate::simd::traits::SimdRegister;
use crate::simd::F32x4;

const NEAREST: i32 = _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC;
const DOWN: i32 = _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC;
const TOWARD_ZERO: i32 = _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC;

#[inline]
#[target_feature(enable = "sse")]
unsafe fn load(value: F32x4) -> __m128 {
    _mm_load_ps(value.as_ptr())
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn store(value: __m128) -> F32x4 {
    let mut out = F32x4::default();
    _mm_store_ps(out.as_mut_ptr(), value);
    out
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn store_mask(value: __m128) -> Mask32x4 {
    let mut bits = [0u32; 4];
    _mm_storeu_ps(bits.as_mut_ptr().cast(), value);
    Mask32x4::from_bits_unchecked(bits)
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn lane_mask(lanes: Lanes) -> __m128 {
    load(F32x4::from_bits(Mask32x4::from_lanes(lanes).to_bits()))
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn broadcast_x(value: __m128) -> __m128 {
    _mm_shuffle_ps::<0>(value, value)
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn add(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_add_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn subtract(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_sub_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn multiply(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_mul_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn divide(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_div_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn sqrt(value: F32x4) -> F32x4 {
    store(_mm_sqrt_ps(load(value)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn min(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_min_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn max(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_max_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse3")]
pub(crate) unsafe fn horizontal_add(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_hadd_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn round(value: F32x4) -> F32x4 {
    store(_mm_round_ps::<NEAREST>(load(value)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn floor(value: F32x4) -> F32x4 {
    store(_mm_round_ps::<DOWN>(load(value)))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn truncate(value: F32x4) -> F32x4 {
    store(_mm_round_ps::<TOWARD_ZERO>(load(value)))
}

// ================================================================================================
// BITWISE
// ================================================================================================

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn and(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_and_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn or(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_or_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn xor(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_xor_ps(load(left), load(right)))
}

/// `!left & right`
#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn and_not(left: F32x4, right: F32x4) -> F32x4 {
    store(_mm_andnot_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn not(value: F32x4) -> F32x4 {
    store(_mm_xor_ps(load(value), lane_mask(Lanes::XYZW)))
}

// ================================================================================================
// COMPARISON
// ================================================================================================

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_eq(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmpeq_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_ne(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmpneq_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_gt(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmpgt_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_lt(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmplt_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_ge(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmpge_ps(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn compare_le(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(_mm_cmple_ps(load(left), load(right)))
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

/// Single instruction dot product. The high nibble of the immediate picks
/// the multiplied lanes, the low nibble broadcasts the sum.
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn dot_sse41(left: F32x4, right: F32x4, lanes: Lanes) -> F32x4 {
    let (l, r) = (load(left), load(right));
    let sum = match lanes {
        Lanes::XY => _mm_dp_ps::<0x3F>(l, r),
        Lanes::XYZ => _mm_dp_ps::<0x7F>(l, r),
        _ => _mm_dp_ps::<0xFF>(l, r),
    };
    store(sum)
}

/// Masked multiply, then two horizontal adds leave the sum in every lane.
#[inline]
#[target_feature(enable = "sse3")]
pub(crate) unsafe fn dot_sse3(left: F32x4, right: F32x4, lanes: Lanes) -> F32x4 {
    let products = _mm_and_ps(_mm_mul_ps(load(left), load(right)), lane_mask(lanes));
    let pairs = _mm_hadd_ps(products, products);
    store(_mm_hadd_ps(pairs, pairs))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn dot_sse(left: F32x4, right: F32x4, lanes: Lanes) -> F32x4 {
    let products = _mm_and_ps(_mm_mul_ps(load(left), load(right)), lane_mask(lanes));
    // (p0 + p1, p1 + p0, p2 + p3, p3 + p2)
    let pairs = _mm_add_ps(
        products,
        _mm_shuffle_ps::<{ shuffle(2, 3, 0, 1) }>(products, products),
    );
    let sum = _mm_add_ss(pairs, _mm_movehl_ps(pairs, pairs));
    store(broadcast_x(sum))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn cross2d(left: F32x4, right: F32x4) -> F32x4 {
    let r = load(right);
    // (x1 * y2, y1 * x2, ..)
    let products = _mm_mul_ps(load(left), _mm_shuffle_ps::<{ shuffle(0, 1, 0, 1) }>(r, r));
    let cross = _mm_sub_ss(
        products,
        _mm_shuffle_ps::<{ shuffle(1, 1, 1, 1) }>(products, products),
    );
    store(broadcast_x(cross))
}

#[inline]
#[target_feature(enable = "sse")]
pub(crate) unsafe fn cross3d(left: F32x4, right: F32x4) -> F32x4 {
    let (l, r) = (load(left), load(right));

    // (y, z, x, w) and (z, x, y, w)
    let l_yzx = _mm_shuffle_ps::<{ shuffle(3, 0, 2, 1) }>(l, l);
    let r_zxy = _mm_shuffle_ps::<{ shuffle(3, 1, 0, 2) }>(r, r);
    let l_zxy = _mm_shuffle_ps::<{ shuffle(3, 1, 0, 2) }>(l, l);
    let r_yzx = _mm_shuffle_ps::<{ shuffle(3, 0, 2, 1) }>(r, r);

    let cross = _mm_sub_ps(_mm_mul_ps(l_yzx, r_zxy), _mm_mul_ps(l_zxy, r_yzx));
    store(_mm_and_ps(cross, lane_mask(Lanes::XYZ)))
}

// ================================================================================================
// FUSED
// ================================================================================================

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_multiply_add(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(_mm_fmadd_ps(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_multiply_subtract(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(_mm_fmsub_ps(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_negate_multiply_add(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(_mm_fnmadd_ps(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_negate_multiply_subtract(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(_mm_fnmsub_ps(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_multiply_add_subtract_alternating(
    x: F32x4,
    y: F32x4,
    z: F32x4,
) -> F32x4 {
    store(_mm_fmaddsub_ps(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "fma")]
pub(crate) unsafe fn fused_multiply_subtract_add_alternating(
    x: F32x4,
    y: F32x4,
    z: F32x4,
) -> F32x4 {
    store(_mm_fmsubadd_ps(load(x), load(y), load(z)))
}
