//! AArch64 NEON kernels.
//!
//! [`F32x4`](crate::simd::F32x4) maps onto one `float32x4_t`,
//! [`F64x4`](crate::simd::F64x4) onto a pair of `float64x2_t`. NEON has no
//! SSE style `min`/`max`, so both are built from a compare and a bit select
//! to keep the NaN behaviour of the other tiers.

pub(crate) mod f32x4;
pub(crate) mod f64x4;
