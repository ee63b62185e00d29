use std::arch::aarch64::*;

use crate::simd::mask::{Lanes, Mask32x4};
use crate::simd::traits::SimdRegister;
use crate::simd::F32x4;

#[inline]
#[target_feature(enable = "neon")]
unsafe fn load(value: F32x4) -> float32x4_t {
    vld1q_f32(value.as_ptr())
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store(value: float32x4_t) -> F32x4 {
    let mut out = F32x4::default();
    vst1q_f32(out.as_mut_ptr(), value);
    out
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store_mask(value: uint32x4_t) -> Mask32x4 {
    let mut bits = [0u32; 4];
    vst1q_u32(bits.as_mut_ptr(), value);
    Mask32x4::from_bits_unchecked(bits)
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn load_bits(value: F32x4) -> uint32x4_t {
    vreinterpretq_u32_f32(load(value))
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn store_bits(value: uint32x4_t) -> F32x4 {
    store(vreinterpretq_f32_u32(value))
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn lane_mask(lanes: Lanes) -> uint32x4_t {
    let bits = Mask32x4::from_lanes(lanes).to_bits();
    vld1q_u32(bits.as_ptr())
}

/// Flips the sign of `value` in `lanes`.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn negate_lanes(value: F32x4, lanes: Lanes) -> float32x4_t {
    let sign = load_bits(F32x4::sign_mask_in(lanes));
    vreinterpretq_f32_u32(veorq_u32(load_bits(value), sign))
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn add(left: F32x4, right: F32x4) -> F32x4 {
    store(vaddq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn subtract(left: F32x4, right: F32x4) -> F32x4 {
    store(vsubq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn multiply(left: F32x4, right: F32x4) -> F32x4 {
    store(vmulq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn divide(left: F32x4, right: F32x4) -> F32x4 {
    store(vdivq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn sqrt(value: F32x4) -> F32x4 {
    store(vsqrtq_f32(load(value)))
}

/// `left < right ? left : right`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn min(left: F32x4, right: F32x4) -> F32x4 {
    let (l, r) = (load(left), load(right));
    store(vbslq_f32(vcltq_f32(l, r), l, r))
}

/// `left > right ? left : right`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn max(left: F32x4, right: F32x4) -> F32x4 {
    let (l, r) = (load(left), load(right));
    store(vbslq_f32(vcgtq_f32(l, r), l, r))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn horizontal_add(left: F32x4, right: F32x4) -> F32x4 {
    store(vpaddq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn round(value: F32x4) -> F32x4 {
    store(vrndnq_f32(load(value)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn floor(value: F32x4) -> F32x4 {
    store(vrndmq_f32(load(value)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn truncate(value: F32x4) -> F32x4 {
    store(vrndq_f32(load(value)))
}

// ================================================================================================
// BITWISE
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn and(left: F32x4, right: F32x4) -> F32x4 {
    store_bits(vandq_u32(load_bits(left), load_bits(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn or(left: F32x4, right: F32x4) -> F32x4 {
    store_bits(vorrq_u32(load_bits(left), load_bits(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn xor(left: F32x4, right: F32x4) -> F32x4 {
    store_bits(veorq_u32(load_bits(left), load_bits(right)))
}

/// `!left & right`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn and_not(left: F32x4, right: F32x4) -> F32x4 {
    // vbic computes `a & !b`
    store_bits(vbicq_u32(load_bits(right), load_bits(left)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn not(value: F32x4) -> F32x4 {
    store_bits(vmvnq_u32(load_bits(value)))
}

// ================================================================================================
// COMPARISON
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_eq(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vceqq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_ne(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vmvnq_u32(vceqq_f32(load(left), load(right))))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_gt(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vcgtq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_lt(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vcltq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_ge(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vcgeq_f32(load(left), load(right)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn compare_le(left: F32x4, right: F32x4) -> Mask32x4 {
    store_mask(vcleq_f32(load(left), load(right)))
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn dot(left: F32x4, right: F32x4, lanes: Lanes) -> F32x4 {
    let products = vreinterpretq_u32_f32(vmulq_f32(load(left), load(right)));
    let masked = vreinterpretq_f32_u32(vandq_u32(products, lane_mask(lanes)));
    store(vdupq_n_f32(vaddvq_f32(masked)))
}

// ================================================================================================
// FUSED
// ================================================================================================

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_add(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(vfmaq_f32(load(z), load(x), load(y)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_subtract(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(vfmaq_f32(vnegq_f32(load(z)), load(x), load(y)))
}

/// `-(x * y) + z`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_negate_multiply_add(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(vfmsq_f32(load(z), load(x), load(y)))
}

/// `-(x * y) - z`
#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_negate_multiply_subtract(x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
    store(vnegq_f32(vfmaq_f32(load(z), load(x), load(y))))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_add_subtract_alternating(
    x: F32x4,
    y: F32x4,
    z: F32x4,
) -> F32x4 {
    store(vfmaq_f32(negate_lanes(z, Lanes::X | Lanes::Z), load(x), load(y)))
}

#[inline]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn fused_multiply_subtract_add_alternating(
    x: F32x4,
    y: F32x4,
    z: F32x4,
) -> F32x4 {
    store(vfmaq_f32(negate_lanes(z, Lanes::Y | Lanes::W), load(x), load(y)))
}
