//! Fused multiply-add kernels and the `fast_*` family built on them.
//!
//! The `fused_*` kernels always round once. Without native FMA hardware the
//! positive variants are emulated lane by lane with `mul_add`; the negated
//! variants have no emulation and fail with
//! [`LaneError::PlatformNotSupported`](crate::error::LaneError::PlatformNotSupported).
//!
//! The `fast_*` kernels only promise the value of the expression. They fuse
//! when the dispatcher allows imprecise math and has native FMA, and fall
//! back to a separate multiply and add otherwise.

#[cfg(arm_simd)]
use crate::simd::neon;
#[cfg(x86_simd)]
use crate::simd::{avx, sse};

use crate::error::{platform_not_supported, LaneError, Result, FMA_NOT_SUPPORTED};
use crate::ops::Arithmetic;
use crate::simd::dispatch::dispatch;
use crate::simd::{scalar, Dispatcher, ElementKind, F32x4, F64x4, Lanes, Operation, SimdRegister};

pub trait Fused<R: SimdRegister>: Arithmetic<R> {
    /// `x * y + z`
    fn fused_multiply_add(&self, x: R, y: R, z: R) -> R;

    /// `x * y - z`
    fn fused_multiply_subtract(&self, x: R, y: R, z: R) -> R;

    /// `-(x * y) + z`. Requires native FMA.
    fn fused_negate_multiply_add(&self, x: R, y: R, z: R) -> Result<R>;

    /// `-(x * y) - z`. Requires native FMA.
    fn fused_negate_multiply_subtract(&self, x: R, y: R, z: R) -> Result<R>;

    /// `x * y - z` in X and Z, `x * y + z` in Y and W.
    fn fused_multiply_add_subtract_alternating(&self, x: R, y: R, z: R) -> R;

    /// `x * y + z` in X and Z, `x * y - z` in Y and W.
    fn fused_multiply_subtract_add_alternating(&self, x: R, y: R, z: R) -> R;

    /// Whether the `fast_*` family takes the native fused path.
    fn fuses_fast_operations(&self) -> bool;

    #[inline]
    fn fast_multiply_add(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            self.fused_multiply_add(x, y, z)
        } else {
            self.add(self.multiply(x, y), z)
        }
    }

    #[inline]
    fn fast_multiply_subtract(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            self.fused_multiply_subtract(x, y, z)
        } else {
            self.subtract(self.multiply(x, y), z)
        }
    }

    /// `z - x * y`
    #[inline]
    fn fast_negate_multiply_add(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            if let Ok(result) = self.fused_negate_multiply_add(x, y, z) {
                return result;
            }
        }
        self.subtract(z, self.multiply(x, y))
    }

    /// `-(x * y) - z`
    #[inline]
    fn fast_negate_multiply_subtract(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            if let Ok(result) = self.fused_negate_multiply_subtract(x, y, z) {
                return result;
            }
        }
        self.negate(self.add(self.multiply(x, y), z))
    }

    #[inline]
    fn fast_multiply_add_subtract_alternating(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            self.fused_multiply_add_subtract_alternating(x, y, z)
        } else {
            let z = self.xor(z, R::sign_mask_in(Lanes::X | Lanes::Z));
            self.add(self.multiply(x, y), z)
        }
    }

    #[inline]
    fn fast_multiply_subtract_add_alternating(&self, x: R, y: R, z: R) -> R {
        if self.fuses_fast_operations() {
            self.fused_multiply_subtract_add_alternating(x, y, z)
        } else {
            let z = self.xor(z, R::sign_mask_in(Lanes::Y | Lanes::W));
            self.add(self.multiply(x, y), z)
        }
    }
}

fn fma_refused(operation: &'static str, kind: ElementKind) -> LaneError {
    tracing::debug!(operation, kind = kind.name(), "no native FMA, refusing fused variant");
    platform_not_supported(FMA_NOT_SUPPORTED)
}

impl Fused<F32x4> for Dispatcher {
    #[inline]
    fn fused_multiply_add(&self, x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
        dispatch!(self, Operation::Fused, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_multiply_add(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_multiply_add(x, y, z),
            _ => scalar::fused_multiply_add(x, y, z),
        )
    }

    #[inline]
    fn fused_multiply_subtract(&self, x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
        dispatch!(self, Operation::Fused, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_multiply_subtract(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_multiply_subtract(x, y, z),
            _ => scalar::fused_multiply_subtract(x, y, z),
        )
    }

    #[inline]
    fn fused_negate_multiply_add(&self, x: F32x4, y: F32x4, z: F32x4) -> Result<F32x4> {
        Ok(dispatch!(self, Operation::FusedNegated, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_negate_multiply_add(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_negate_multiply_add(x, y, z),
            _ => return Err(fma_refused("fused_negate_multiply_add", ElementKind::F32)),
        ))
    }

    #[inline]
    fn fused_negate_multiply_subtract(&self, x: F32x4, y: F32x4, z: F32x4) -> Result<F32x4> {
        Ok(dispatch!(self, Operation::FusedNegated, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_negate_multiply_subtract(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_negate_multiply_subtract(x, y, z),
            _ => return Err(fma_refused("fused_negate_multiply_subtract", ElementKind::F32)),
        ))
    }

    #[inline]
    fn fused_multiply_add_subtract_alternating(&self, x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
        dispatch!(self, Operation::Fused, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_multiply_add_subtract_alternating(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_multiply_add_subtract_alternating(x, y, z),
            _ => scalar::fused_multiply_add_subtract_alternating(x, y, z),
        )
    }

    #[inline]
    fn fused_multiply_subtract_add_alternating(&self, x: F32x4, y: F32x4, z: F32x4) -> F32x4 {
        dispatch!(self, Operation::Fused, ElementKind::F32;
            #[cfg(x86_simd)] Fma => sse::f32x4::fused_multiply_subtract_add_alternating(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f32x4::fused_multiply_subtract_add_alternating(x, y, z),
            _ => scalar::fused_multiply_subtract_add_alternating(x, y, z),
        )
    }

    #[inline]
    fn fuses_fast_operations(&self) -> bool {
        self.can_fuse_operations()
    }
}

impl Fused<F64x4> for Dispatcher {
    #[inline]
    fn fused_multiply_add(&self, x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
        dispatch!(self, Operation::Fused, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_multiply_add(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_multiply_add(x, y, z),
            _ => scalar::fused_multiply_add(x, y, z),
        )
    }

    #[inline]
    fn fused_multiply_subtract(&self, x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
        dispatch!(self, Operation::Fused, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_multiply_subtract(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_multiply_subtract(x, y, z),
            _ => scalar::fused_multiply_subtract(x, y, z),
        )
    }

    #[inline]
    fn fused_negate_multiply_add(&self, x: F64x4, y: F64x4, z: F64x4) -> Result<F64x4> {
        Ok(dispatch!(self, Operation::FusedNegated, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_negate_multiply_add(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_negate_multiply_add(x, y, z),
            _ => return Err(fma_refused("fused_negate_multiply_add", ElementKind::F64)),
        ))
    }

    #[inline]
    fn fused_negate_multiply_subtract(&self, x: F64x4, y: F64x4, z: F64x4) -> Result<F64x4> {
        Ok(dispatch!(self, Operation::FusedNegated, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_negate_multiply_subtract(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_negate_multiply_subtract(x, y, z),
            _ => return Err(fma_refused("fused_negate_multiply_subtract", ElementKind::F64)),
        ))
    }

    #[inline]
    fn fused_multiply_add_subtract_alternating(&self, x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
        dispatch!(self, Operation::Fused, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_multiply_add_subtract_alternating(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_multiply_add_subtract_alternating(x, y, z),
            _ => scalar::fused_multiply_add_subtract_alternating(x, y, z),
        )
    }

    #[inline]
    fn fused_multiply_subtract_add_alternating(&self, x: F64x4, y: F64x4, z: F64x4) -> F64x4 {
        dispatch!(self, Operation::Fused, ElementKind::F64;
            #[cfg(x86_simd)] Fma => avx::f64x4::fused_multiply_subtract_add_alternating(x, y, z),
            #[cfg(arm_simd)] Neon => neon::f64x4::fused_multiply_subtract_add_alternating(x, y, z),
            _ => scalar::fused_multiply_subtract_add_alternating(x, y, z),
        )
    }

    #[inline]
    fn fuses_fast_operations(&self) -> bool {
        self.can_fuse_operations()
    }
}
