//! 4-lane double precision register.

use crate::simd::register::register_operators;
use crate::simd::traits::SimdRegister;

/// Alignment of [`F64x4`] and of the pointers its aligned loads accept.
pub const AVX_ALIGNMENT: usize = 32;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 64-bit floating point values.
///
/// One 256-bit AVX register, or two 128-bit halves on SSE2 and NEON. The
/// 32 byte alignment keeps both halves 16 byte aligned as well.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C, align(32))]
pub struct F64x4 {
    lanes: [f64; LANE_COUNT],
}

impl F64x4 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            lanes: [x, y, z, w],
        }
    }

    #[inline(always)]
    pub const fn splat(value: f64) -> Self {
        Self {
            lanes: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    pub const fn from_array(lanes: [f64; LANE_COUNT]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub const fn to_array(self) -> [f64; LANE_COUNT] {
        self.lanes
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const f64 {
        self.lanes.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f64 {
        self.lanes.as_mut_ptr()
    }
}

impl SimdRegister for F64x4 {
    type Scalar = f64;

    const ALIGNMENT: usize = AVX_ALIGNMENT;

    #[inline(always)]
    fn from_array(lanes: [f64; LANE_COUNT]) -> Self {
        F64x4::from_array(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f64; LANE_COUNT] {
        F64x4::to_array(self)
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        F64x4::splat(value)
    }
}

impl From<[f64; LANE_COUNT]> for F64x4 {
    fn from(lanes: [f64; LANE_COUNT]) -> Self {
        F64x4::from_array(lanes)
    }
}

impl From<F64x4> for [f64; LANE_COUNT] {
    fn from(register: F64x4) -> Self {
        register.to_array()
    }
}

register_operators!(F64x4, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaneError;
    use crate::simd::traits::{SimdLoad, SimdStore};

    #[repr(C, align(32))]
    struct Aligned([f64; 8]);

    mod layout_tests {
        use super::*;

        #[test]
        fn test_size_and_alignment() {
            assert_eq!(std::mem::size_of::<F64x4>(), 32);
            assert_eq!(std::mem::align_of::<F64x4>(), AVX_ALIGNMENT);
        }

        #[test]
        fn test_lane_accessors() {
            let v = F64x4::new(1.0, 2.0, 3.0, 4.0);
            assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
            assert_eq!(v.with_lane(2, 9.0).to_array(), [1.0, 2.0, 9.0, 4.0]);
            assert_eq!(<[f64; 4]>::from(v), [1.0, 2.0, 3.0, 4.0]);
        }

        #[test]
        fn test_bit_casts() {
            let v = F64x4::new(-0.0, 1.0, f64::INFINITY, -2.0);
            assert_eq!(F64x4::from_bits(v.to_bits()), v);
            assert_eq!(F64x4::sign_mask().to_bits(), [0x8000_0000_0000_0000; 4]);
        }
    }

    mod operator_tests {
        use super::*;

        #[test]
        fn test_arithmetic_operators() {
            let a = F64x4::new(1.0, 2.0, 3.0, 4.0);
            let b = F64x4::new(4.0, 3.0, 2.0, 1.0);

            assert_eq!((a + b).to_array(), [5.0; 4]);
            assert_eq!((a - b).to_array(), [-3.0, -1.0, 1.0, 3.0]);
            assert_eq!((a * b).to_array(), [4.0, 6.0, 6.0, 4.0]);
            assert_eq!((a / b).to_array(), [0.25, 2.0 / 3.0, 1.5, 4.0]);
            assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        }

        #[test]
        fn test_scalar_operands() {
            let mut v = F64x4::new(1.0, 2.0, 3.0, 4.0);
            assert_eq!((v * 2.0).to_array(), [2.0, 4.0, 6.0, 8.0]);
            assert_eq!((v + 1.0).to_array(), [2.0, 3.0, 4.0, 5.0]);

            v -= 1.0;
            v /= 2.0;
            assert_eq!(v.to_array(), [0.0, 0.5, 1.0, 1.5]);
        }

        #[test]
        fn test_bitwise_operators() {
            let v = F64x4::new(1.0, -2.0, 3.0, -4.0);
            let sign = F64x4::sign_mask();

            assert_eq!((v & sign).to_bits(), [0, 0x8000_0000_0000_0000, 0, 0x8000_0000_0000_0000]);
            assert_eq!((v ^ sign).to_array(), [-1.0, 2.0, -3.0, 4.0]);
            assert_eq!((!sign).to_bits(), [0x7FFF_FFFF_FFFF_FFFF; 4]);
            assert_eq!((v | sign).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        }
    }

    mod memory_tests {
        use super::*;

        #[test]
        fn test_aligned_roundtrip_every_dimension() {
            let source = Aligned([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

            for lanes in 2..=4 {
                let v = unsafe { F64x4::load_aligned(source.0.as_ptr(), lanes) };
                let mut target = Aligned([0.0; 8]);
                unsafe { v.store_aligned(target.0.as_mut_ptr(), lanes) };
                assert_eq!(&target.0[..lanes], &source.0[..lanes]);
                assert!(target.0[lanes..].iter().all(|&x| x == 0.0));
            }
        }

        #[test]
        fn test_unaligned_roundtrip_every_dimension() {
            let source = Aligned([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
            // One element in is 8 bytes past a 32 byte boundary.
            let ptr = unsafe { source.0.as_ptr().add(1) };

            for lanes in 2..=4 {
                let v = unsafe { F64x4::load_unaligned(ptr, lanes) };
                let mut target = Aligned([0.0; 8]);
                unsafe { v.store_unaligned(target.0.as_mut_ptr().add(1), lanes) };
                assert_eq!(&target.0[1..1 + lanes], &source.0[1..1 + lanes]);
            }
        }

        #[test]
        fn test_partial_load_zero_fills() {
            let data = [7.0f64, 8.0, 9.0];
            let v = unsafe { F64x4::load(data.as_ptr(), 3) };
            assert_eq!(v.to_array(), [7.0, 8.0, 9.0, 0.0]);
            assert_eq!(F64x4::from_slice(&data[..2]).to_array(), [7.0, 8.0, 0.0, 0.0]);
        }

        #[test]
        fn test_checked_aligned_load_rejects_misalignment() {
            let source = Aligned([0.0; 8]);
            let ptr = unsafe { source.0.as_ptr().add(1) };

            let result = unsafe { F64x4::load_aligned_checked(ptr, 4) };
            match result {
                Err(LaneError::AccessViolation { address, message }) => {
                    assert_eq!(address, ptr as usize);
                    assert!(message.contains("32 byte aligned"));
                }
                other => panic!("expected access violation, got {other:?}"),
            }

            assert!(unsafe { F64x4::load_aligned_checked(source.0.as_ptr(), 4) }.is_ok());
        }

        #[test]
        fn test_checked_aligned_store_rejects_misalignment() {
            let mut target = Aligned([0.0; 8]);
            let v = F64x4::splat(1.0);

            let ptr = unsafe { target.0.as_mut_ptr().add(2) };
            assert!(matches!(
                unsafe { v.store_aligned_checked(ptr, 4) },
                Err(LaneError::AccessViolation { .. })
            ));
            assert!(target.0.iter().all(|&x| x == 0.0));

            assert!(unsafe { v.store_aligned_checked(target.0.as_mut_ptr().add(4), 4) }.is_ok());
            assert_eq!(&target.0[4..], &[1.0; 4]);
        }

        #[test]
        fn test_write_to_slice_truncates() {
            let mut out = [0.0f64; 2];
            F64x4::new(1.0, 2.0, 3.0, 4.0).write_to_slice(&mut out);
            assert_eq!(out, [1.0, 2.0]);
        }
    }

    #[cfg(debug_assertions)]
    mod debug_assertion_tests {
        use super::*;

        #[test]
        #[should_panic(expected = "Pointer must be 32 byte aligned")]
        fn test_unchecked_aligned_load_asserts_in_debug() {
            let source = Aligned([0.0; 8]);
            let _ = unsafe { F64x4::load_aligned(source.0.as_ptr().add(1), 4) };
        }

        #[test]
        #[should_panic(expected = "Lane count must be in 1..=4")]
        fn test_load_rejects_zero_lanes() {
            let data = [0.0f64; 4];
            let _ = unsafe { F64x4::load(data.as_ptr(), 0) };
        }
    }
}
