pub mod capability;
pub mod dispatch;
pub mod f32x4;
pub mod f64x4;
pub mod mask;
mod register;
pub(crate) mod scalar;
pub mod slice;
pub mod traits;

#[cfg(x86_simd)]
pub(crate) mod avx;

#[cfg(x86_simd)]
pub(crate) mod sse;

#[cfg(arm_simd)]
pub(crate) mod neon;

pub use capability::{Capability, CapabilitySet};
pub use dispatch::{Dispatcher, Operation, Path};
pub use f32x4::F32x4;
pub use f64x4::F64x4;
pub use mask::{LaneMask, Lanes, Mask32x4, Mask64x4};
pub use slice::SliceMath;
pub use traits::{Element, ElementKind, SimdLoad, SimdRegister, SimdStore};
