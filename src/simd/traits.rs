//! Core traits of the register abstraction.
//!
//! [`Element`] closes the set of lane types to `f32` and `f64`, so asking for
//! any other element type is a compile error rather than a runtime failure.
//! [`SimdRegister`] is the common currency between kernels: a 4-lane value
//! type addressed as X, Y, Z, W. [`SimdLoad`] and [`SimdStore`] move
//! registers in and out of caller memory.

use std::fmt::{Debug, Display};

use num::{Bounded, Float, PrimInt, Unsigned, Zero};

use crate::error::{access_violation, Result};
use crate::simd::mask::{LaneMask, Lanes};

pub(crate) mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for crate::simd::F32x4 {}
    impl Sealed for crate::simd::F64x4 {}
}

/// The two element kinds a register can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    F32,
    F64,
}

impl ElementKind {
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }
}

/// A floating point lane type.
///
/// Sealed: only `f32` and `f64` implement it.
pub trait Element:
    Float + Default + Debug + Display + Send + Sync + 'static + private::Sealed
{
    /// Unsigned integer with the same width, used for raw bit manipulation.
    type Bits: PrimInt + Unsigned + Debug + Send + Sync + 'static;

    const KIND: ElementKind;

    fn to_bits(self) -> Self::Bits;

    fn from_bits(bits: Self::Bits) -> Self;

    /// Converts an `f64` constant to this element type (rounding for `f32`).
    fn from_constant(value: f64) -> Self;

    /// Rounds to the nearest integer, ties to even.
    fn round_ties_even(self) -> Self;

    /// Only the sign bit set.
    #[inline(always)]
    fn sign_bit() -> Self::Bits {
        !(Self::Bits::max_value() >> 1)
    }
}

impl Element for f32 {
    type Bits = u32;

    const KIND: ElementKind = ElementKind::F32;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline(always)]
    fn from_constant(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn round_ties_even(self) -> Self {
        f32::round_ties_even(self)
    }
}

impl Element for f64 {
    type Bits = u64;

    const KIND: ElementKind = ElementKind::F64;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline(always)]
    fn from_constant(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn round_ties_even(self) -> Self {
        f64::round_ties_even(self)
    }
}

/// Raw lane bits of a register holding `T`.
pub type LaneBits<T> = [<T as Element>::Bits; 4];

/// A 4-lane register of floating point elements.
///
/// Registers are plain values. For 2 and 3 dimensional data the high lanes
/// are don't-care: kernels only zero them when documented to.
pub trait SimdRegister:
    Copy + Debug + Default + PartialEq + Send + Sync + 'static + private::Sealed
{
    type Scalar: Element;

    const LANES: usize = 4;

    /// Alignment in bytes required by the aligned load and store variants.
    const ALIGNMENT: usize;

    fn from_array(lanes: [Self::Scalar; 4]) -> Self;

    fn to_array(self) -> [Self::Scalar; 4];

    #[inline(always)]
    fn splat(value: Self::Scalar) -> Self {
        Self::from_array([value; 4])
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::splat(Self::Scalar::zero())
    }

    /// Broadcasts an `f64` constant into every lane.
    #[inline(always)]
    fn constant(value: f64) -> Self {
        Self::splat(Self::Scalar::from_constant(value))
    }

    #[inline(always)]
    fn from_bits(bits: LaneBits<Self::Scalar>) -> Self {
        Self::from_array(bits.map(Self::Scalar::from_bits))
    }

    #[inline(always)]
    fn to_bits(self) -> LaneBits<Self::Scalar> {
        self.to_array().map(Self::Scalar::to_bits)
    }

    /// Every lane holds only the sign bit.
    #[inline(always)]
    fn sign_mask() -> Self {
        Self::from_bits([Self::Scalar::sign_bit(); 4])
    }

    /// Sign bit set in the lanes of `lanes`, clear elsewhere.
    #[inline(always)]
    fn sign_mask_in(lanes: Lanes) -> Self {
        let sign = Self::Scalar::sign_bit();
        let zero = <Self::Scalar as Element>::Bits::zero();
        Self::from_bits(std::array::from_fn(|i| if lanes.contains(i) { sign } else { zero }))
    }

    /// All bits set in the lanes of `lanes`, clear elsewhere.
    #[inline(always)]
    fn active_lanes(lanes: Lanes) -> Self {
        Self::from_bits(LaneMask::<Self::Scalar>::from_lanes(lanes).to_bits())
    }

    /// Returns lane `index`. Panics when `index >= 4`.
    #[inline(always)]
    fn lane(self, index: usize) -> Self::Scalar {
        self.to_array()[index]
    }

    /// Returns a copy with lane `index` replaced. Panics when `index >= 4`.
    #[inline(always)]
    fn with_lane(self, index: usize, value: Self::Scalar) -> Self {
        let mut lanes = self.to_array();
        lanes[index] = value;
        Self::from_array(lanes)
    }

    #[inline(always)]
    fn x(self) -> Self::Scalar {
        self.lane(0)
    }

    #[inline(always)]
    fn y(self) -> Self::Scalar {
        self.lane(1)
    }

    #[inline(always)]
    fn z(self) -> Self::Scalar {
        self.lane(2)
    }

    #[inline(always)]
    fn w(self) -> Self::Scalar {
        self.lane(3)
    }

    /// Checks if the pointer satisfies [`Self::ALIGNMENT`].
    #[inline(always)]
    fn is_aligned(ptr: *const Self::Scalar) -> bool {
        ptr as usize % Self::ALIGNMENT == 0
    }
}

/// Loading registers from memory.
///
/// `lanes` is the logical dimensionality (1 to 4). Lanes past it are zero
/// filled; they are still don't-care for the kernels.
pub trait SimdLoad: SimdRegister {
    /// Loads `lanes` elements from `ptr` with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `lanes` elements.
    #[inline(always)]
    unsafe fn load(ptr: *const Self::Scalar, lanes: usize) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(
            (1..=Self::LANES).contains(&lanes),
            "Lane count must be in 1..={}",
            Self::LANES
        );

        let mut out = [Self::Scalar::zero(); 4];
        std::ptr::copy_nonoverlapping(ptr, out.as_mut_ptr(), lanes.min(Self::LANES));
        Self::from_array(out)
    }

    /// Loads `lanes` elements from a pointer aligned to [`SimdRegister::ALIGNMENT`].
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `lanes` elements and aligned.
    /// Misalignment is only caught by a debug assertion.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const Self::Scalar, lanes: usize) -> Self {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {} byte aligned",
            Self::ALIGNMENT
        );

        if lanes == Self::LANES {
            Self::from_array(ptr.cast::<[Self::Scalar; 4]>().read())
        } else {
            Self::load(ptr, lanes)
        }
    }

    /// Loads `lanes` elements from an unaligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `lanes` elements.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const Self::Scalar, lanes: usize) -> Self {
        Self::load(ptr, lanes)
    }

    /// Like [`SimdLoad::load_aligned`], but reports misalignment as
    /// [`LaneError::AccessViolation`](crate::error::LaneError::AccessViolation).
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `lanes` elements.
    #[inline]
    unsafe fn load_aligned_checked(ptr: *const Self::Scalar, lanes: usize) -> Result<Self> {
        if !Self::is_aligned(ptr) {
            return Err(access_violation(
                ptr,
                format!("pointer must be {} byte aligned", Self::ALIGNMENT),
            ));
        }
        Ok(Self::load_aligned(ptr, lanes))
    }

    /// Loads up to four leading elements of `slice`. Missing lanes are zero.
    #[inline]
    fn from_slice(slice: &[Self::Scalar]) -> Self {
        let mut out = [Self::Scalar::zero(); 4];
        let count = slice.len().min(Self::LANES);
        out[..count].copy_from_slice(&slice[..count]);
        Self::from_array(out)
    }
}

/// Storing registers to memory.
pub trait SimdStore: SimdRegister {
    /// Stores the first `lanes` elements to `ptr` with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `lanes` elements.
    #[inline(always)]
    unsafe fn store(self, ptr: *mut Self::Scalar, lanes: usize) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(
            (1..=Self::LANES).contains(&lanes),
            "Lane count must be in 1..={}",
            Self::LANES
        );

        let values = self.to_array();
        std::ptr::copy_nonoverlapping(values.as_ptr(), ptr, lanes.min(Self::LANES));
    }

    /// Stores the first `lanes` elements to an aligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `lanes` elements and aligned to
    /// [`SimdRegister::ALIGNMENT`].
    #[inline(always)]
    unsafe fn store_aligned(self, ptr: *mut Self::Scalar, lanes: usize) {
        debug_assert!(
            Self::is_aligned(ptr),
            "Pointer must be {} byte aligned",
            Self::ALIGNMENT
        );

        if lanes == Self::LANES {
            ptr.cast::<[Self::Scalar; 4]>().write(self.to_array());
        } else {
            self.store(ptr, lanes);
        }
    }

    /// Stores the first `lanes` elements to an unaligned pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `lanes` elements.
    #[inline(always)]
    unsafe fn store_unaligned(self, ptr: *mut Self::Scalar, lanes: usize) {
        self.store(ptr, lanes)
    }

    /// Like [`SimdStore::store_aligned`], but reports misalignment as an error.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `lanes` elements.
    #[inline]
    unsafe fn store_aligned_checked(self, ptr: *mut Self::Scalar, lanes: usize) -> Result<()> {
        if !Self::is_aligned(ptr) {
            return Err(access_violation(
                ptr.cast_const(),
                format!("pointer must be {} byte aligned", Self::ALIGNMENT),
            ));
        }
        self.store_aligned(ptr, lanes);
        Ok(())
    }

    /// Writes up to four leading lanes into `out`.
    #[inline]
    fn write_to_slice(self, out: &mut [Self::Scalar]) {
        let count = out.len().min(Self::LANES);
        out[..count].copy_from_slice(&self.to_array()[..count]);
    }
}

impl<R: SimdRegister> SimdLoad for R {}
impl<R: SimdRegister> SimdStore for R {}
