//! Four lane vector math with runtime selected SIMD kernels.
//!
//! `lanemath` operates on [`F32x4`](simd::F32x4) and [`F64x4`](simd::F64x4)
//! registers holding 2, 3 or 4 dimensional vectors. Every kernel has a
//! native implementation per instruction set tier (SSE family and AVX on
//! x86, NEON on aarch64) and a software fallback giving the same results.
//! Which one runs is decided by a [`Dispatcher`](simd::Dispatcher) from the
//! capabilities detected at startup.
//!
//! ```
//! use lanemath::prelude::*;
//!
//! let d = Dispatcher::default();
//! let a = F32x4::new(1.0, 0.0, 0.0, 0.0);
//! let b = F32x4::new(0.0, 1.0, 0.0, 0.0);
//!
//! let z = d.cross3d(a, b);
//! assert_eq!(z.to_array(), [0.0, 0.0, 1.0, 0.0]);
//! assert_eq!(d.length3d(z).x(), 1.0);
//! ```

pub mod error;
pub mod ops;
pub mod options;
pub mod simd;

pub mod prelude {
    pub use crate::error::{LaneError, Result};
    pub use crate::ops::{
        Arithmetic, Bitwise, Comparison, Fused, Geometry, Kernels, Trigonometry, VectorMath,
    };
    pub use crate::options::MathOptions;
    pub use crate::simd::{
        Dispatcher, F32x4, F64x4, LaneMask, Lanes, SimdLoad, SimdRegister, SimdStore, SliceMath,
    };
}
