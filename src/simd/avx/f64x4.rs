#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::mask::{Lanes, Mask64x4};
use crate::simd::sse::shuffle;
use crate::simd::traits::SimdRegister;
use crate::simd::F64x4;

const NEAREST: i32 = _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC;
const DOWN: i32 = _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC;
const TOWARD_ZERO: i32 = _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC;

#[inline]
#[target_feature(enable = "avx")]
unsafe fn load(value: F64x4) -> __m256d {
    _mm256_load_pd(value.as_ptr())
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn store(value: __m256d) -> F64x4 {
    let mut out = F64x4::default();
    _mm256_store_pd(out.as_mut_ptr(), value);
    out
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn store_mask(value: __m256d) -> Mask64x4 {
    let mut bits = [0u64; 4];
    _mm256_storeu_pd(bits.as_mut_ptr().cast(), value);
    Mask64x4::from_bits_unchecked(bits)
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn lane_mask(lanes: Lanes) -> __m256d {
    load(F64x4::from_bits(Mask64x4::from_lanes(lanes).to_bits()))
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn add(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_add_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn subtract(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_sub_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn multiply(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_mul_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn divide(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_div_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn sqrt(value: F64x4) -> F64x4 {
    store(_mm256_sqrt_pd(load(value)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn min(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_min_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn max(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_max_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn round(value: F64x4) -> F64x4 {
    store(_mm256_round_pd::<NEAREST>(load(value)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn floor(value: F64x4) -> F64x4 {
    store(_mm256_round_pd::<DOWN>(load(value)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn truncate(value: F64x4) -> F64x4 {
    store(_mm256_round_pd::<TOWARD_ZERO>(load(value)))
}

// ================================================================================================
// BITWISE
// ================================================================================================

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn and(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_and_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn or(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_or_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn xor(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_xor_pd(load(left), load(right)))
}

/// `!left & right`
#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn and_not(left: F64x4, right: F64x4) -> F64x4 {
    store(_mm256_andnot_pd(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn not(value: F64x4) -> F64x4 {
    store(_mm256_xor_pd(load(value), lane_mask(Lanes::XYZW)))
}

// ================================================================================================
// COMPARISON
// ================================================================================================

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_eq(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_EQ_OQ>(load(left), load(right)))
}

/// Unordered, so NaN lanes are set.
#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_ne(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_NEQ_UQ>(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_gt(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_GT_OQ>(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_lt(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_LT_OQ>(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_ge(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_GE_OQ>(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn compare_le(left: F64x4, right: F64x4) -> Mask64x4 {
    store_mask(_mm256_cmp_pd::<_CMP_LE_OQ>(load(left), load(right)))
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

#[inline]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn dot(left: F64x4, right: F64x4, lanes: Lanes) -> F64x4 {
    let products = _mm256_and_pd(_mm256_mul_pd(load(left), load(right)), lane_mask(lanes));
    // (p0 + p1, p0 + p1, p2 + p3, p2 + p3)
    let pairs = _mm256_hadd_pd(products, products);
    let swapped = _mm256_permute2f128_pd::<0x01>(pairs, pairs);
    store(_mm256_add_pd(pairs, swapped))
}

#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn cross3d(left: F64x4, right: F64x4) -> F64x4 {
    let (l, r) = (load(left), load(right));

    let l_yzx = _mm256_permute4x64_pd::<{ shuffle(3, 0, 2, 1) }>(l);
    let r_zxy = _mm256_permute4x64_pd::<{ shuffle(3, 1, 0, 2) }>(r);
    let l_zxy = _mm256_permute4x64_pd::<{ shuffle(3, 1, 0, 2) }>(l);
    let r_yzx = _mm256_permute4x64_pd::<{ shuffle(3, 0, 2, 1) }>(r);

    let cross = _mm256_sub_pd(_mm256_mul_pd(l_yzx, r_zxy), _mm256_mul_pd(l_zxy, r_yzx));
    store(_mm256_and_pd(cross, lane_mask(Lanes::XYZ)))
}

// ================================================================================================
// FUSED
// ================================================================================================

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_multiply_add(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    store(_mm256_fmadd_pd(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_multiply_subtract(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    store(_mm256_fmsub_pd(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_negate_multiply_add(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    store(_mm256_fnmadd_pd(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_negate_multiply_subtract(x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
    store(_mm256_fnmsub_pd(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_multiply_add_subtract_alternating(
    x: F64x4,
    y: F64x4,
    z: F64x4,
) -> F64x4 {
    store(_mm256_fmaddsub_pd(load(x), load(y), load(z)))
}

#[inline]
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fused_multiply_subtract_add_alternating(
    x: F64x4,
    y: F64x4,
    z: F64x4,
) -> F64x4 {
    store(_mm256_fmsubadd_pd(load(x), load(y), load(z)))
}
