//! 4-lane single precision register.

use crate::simd::register::register_operators;
use crate::simd::traits::SimdRegister;

/// Alignment of [`F32x4`] and of the pointers its aligned loads accept.
pub const SSE_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values.
///
/// Laid out as four consecutive `f32` on a 16 byte boundary, so native
/// kernels move it in and out of registers with aligned loads.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C, align(16))]
pub struct F32x4 {
    lanes: [f32; LANE_COUNT],
}

impl F32x4 {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            lanes: [x, y, z, w],
        }
    }

    #[inline(always)]
    pub const fn splat(value: f32) -> Self {
        Self {
            lanes: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    pub const fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub const fn to_array(self) -> [f32; LANE_COUNT] {
        self.lanes
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const f32 {
        self.lanes.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self.lanes.as_mut_ptr()
    }
}

impl SimdRegister for F32x4 {
    type Scalar = f32;

    const ALIGNMENT: usize = SSE_ALIGNMENT;

    #[inline(always)]
    fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        F32x4::from_array(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        F32x4::to_array(self)
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        F32x4::splat(value)
    }
}

impl From<[f32; LANE_COUNT]> for F32x4 {
    fn from(lanes: [f32; LANE_COUNT]) -> Self {
        F32x4::from_array(lanes)
    }
}

impl From<F32x4> for [f32; LANE_COUNT] {
    fn from(register: F32x4) -> Self {
        register.to_array()
    }
}

register_operators!(F32x4, f32);
