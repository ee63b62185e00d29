//! Element-wise kernels over whole slices.
//!
//! Slices are processed one register (4 lanes) at a time through the
//! process-wide [`Dispatcher`]. A trailing block shorter than a register is
//! loaded partially, zero filled, and only its valid lanes are written back.
//!
//! The `par_*` variants split the output into chunks of
//! [`PARALLEL_CHUNK_SIZE`] elements and run them on the rayon thread pool.
//! Inputs up to [`PARALLEL_THRESHOLD`] elements stay on the calling thread.
//!
//! ```
//! use lanemath::simd::SliceMath;
//!
//! let angles = [0.0f32, std::f32::consts::FRAC_PI_2, 1.0, 2.0, 3.0];
//! let sines = angles.sin();
//! assert_eq!(sines.len(), angles.len());
//! assert!((sines[1] - 1.0).abs() < 1e-6);
//! ```

use num::Zero;
use rayon::prelude::*;

use crate::ops::{Arithmetic, Trigonometry};
use crate::simd::{Dispatcher, F32x4, F64x4, SimdLoad, SimdRegister, SimdStore};

/// Elements per parallel work item. A multiple of the register width.
pub const PARALLEL_CHUNK_SIZE: usize = 16 * 1024;

/// Inputs at or below this length are not split across threads.
pub const PARALLEL_THRESHOLD: usize = 4 * PARALLEL_CHUNK_SIZE;

/// Kernels applied to every element of a slice, returning a new vector.
pub trait SliceMath {
    type Output;

    fn sin(&self) -> Self::Output;
    fn cos(&self) -> Self::Output;
    fn tan(&self) -> Self::Output;
    fn sqrt(&self) -> Self::Output;
    fn abs(&self) -> Self::Output;

    fn par_sin(&self) -> Self::Output;
    fn par_cos(&self) -> Self::Output;
    fn par_tan(&self) -> Self::Output;
    fn par_sqrt(&self) -> Self::Output;
    fn par_abs(&self) -> Self::Output;
}

/// Runs `kernel` over `input` register by register, writing into `output`.
#[inline(always)]
fn map_blocks<R, F>(input: &[R::Scalar], output: &mut [R::Scalar], kernel: &F)
where
    R: SimdRegister,
    F: Fn(R) -> R,
{
    debug_assert_eq!(input.len(), output.len(), "Slices must be the same length");

    let mut source = input.chunks_exact(R::LANES);
    let mut target = output.chunks_exact_mut(R::LANES);

    for (a, c) in (&mut source).zip(&mut target) {
        kernel(R::from_slice(a)).write_to_slice(c);
    }

    let rest = source.remainder();
    if !rest.is_empty() {
        let c = target.into_remainder();
        // SAFETY: `rest` and `c` hold exactly `rest.len()` (< LANES) elements.
        unsafe { kernel(R::load(rest.as_ptr(), rest.len())).store(c.as_mut_ptr(), rest.len()) };
    }
}

#[inline(always)]
fn map_slice<R, F>(input: &[R::Scalar], kernel: F) -> Vec<R::Scalar>
where
    R: SimdRegister,
    F: Fn(R) -> R,
{
    let mut output = vec![R::Scalar::zero(); input.len()];
    map_blocks(input, &mut output, &kernel);
    output
}

fn par_map_slice<R, F>(input: &[R::Scalar], kernel: F) -> Vec<R::Scalar>
where
    R: SimdRegister,
    F: Fn(R) -> R + Sync,
{
    if input.len() <= PARALLEL_THRESHOLD {
        return map_slice(input, kernel);
    }

    tracing::trace!(
        len = input.len(),
        chunk = PARALLEL_CHUNK_SIZE,
        "starting parallel slice batch"
    );

    let mut output = vec![R::Scalar::zero(); input.len()];
    output
        .par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(input.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|(c, a)| map_blocks(a, c, &kernel));
    output
}

macro_rules! impl_slice_math {
    ($scalar:ty, $register:ty) => {
        impl SliceMath for [$scalar] {
            type Output = Vec<$scalar>;

            fn sin(&self) -> Self::Output {
                let d = Dispatcher::global();
                map_slice(self, |v: $register| d.sin(v))
            }

            fn cos(&self) -> Self::Output {
                let d = Dispatcher::global();
                map_slice(self, |v: $register| d.cos(v))
            }

            fn tan(&self) -> Self::Output {
                let d = Dispatcher::global();
                map_slice(self, |v: $register| d.tan(v))
            }

            fn sqrt(&self) -> Self::Output {
                let d = Dispatcher::global();
                map_slice(self, |v: $register| d.sqrt(v))
            }

            fn abs(&self) -> Self::Output {
                let d = Dispatcher::global();
                map_slice(self, |v: $register| d.abs(v))
            }

            fn par_sin(&self) -> Self::Output {
                let d = Dispatcher::global();
                par_map_slice(self, |v: $register| d.sin(v))
            }

            fn par_cos(&self) -> Self::Output {
                let d = Dispatcher::global();
                par_map_slice(self, |v: $register| d.cos(v))
            }

            fn par_tan(&self) -> Self::Output {
                let d = Dispatcher::global();
                par_map_slice(self, |v: $register| d.tan(v))
            }

            fn par_sqrt(&self) -> Self::Output {
                let d = Dispatcher::global();
                par_map_slice(self, |v: $register| d.sqrt(v))
            }

            fn par_abs(&self) -> Self::Output {
                let d = Dispatcher::global();
                par_map_slice(self, |v: $register| d.abs(v))
            }
        }
    };
}

impl_slice_math!(f32, F32x4);
impl_slice_math!(f64, F64x4);
