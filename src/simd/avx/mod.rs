//! 256-bit x86 kernels for [`F64x4`](crate::simd::F64x4).
//!
//! AVX holds all four `f64` lanes in one `__m256d`. The cross product needs
//! AVX2 for the cross-lane permute, the fused kernels need FMA.

pub(crate) mod f64x4;
