//! Comparison masks and active-lane sets.
//!
//! A [`LaneMask`] lane is either all bits set (true) or all bits clear
//! (false). The type only hands out constructors that preserve this, so
//! bitwise AND/OR/XOR/NOT double as logical operators and a mask can drive a
//! bit-select directly.
//!
//! Interrogation goes through the move-mask: one bit per lane, taken from
//! the lane's sign bit, X in bit 0 through W in bit 3.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

use num::{Bounded, PrimInt, Zero};

use crate::simd::traits::{Element, LaneBits};

/// A subset of the X, Y, Z, W lanes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Lanes(u8);

impl Lanes {
    pub const NONE: Lanes = Lanes(0b0000);
    pub const X: Lanes = Lanes(0b0001);
    pub const Y: Lanes = Lanes(0b0010);
    pub const Z: Lanes = Lanes(0b0100);
    pub const W: Lanes = Lanes(0b1000);
    pub const XY: Lanes = Lanes(0b0011);
    pub const XYZ: Lanes = Lanes(0b0111);
    pub const XYZW: Lanes = Lanes(0b1111);

    /// Lane set from move-mask style bits; bits above W are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Lanes(bits & 0b1111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The leading `dimension` lanes (X for 1, XY for 2, XYZ for 3, all for 4).
    pub const fn leading(dimension: usize) -> Self {
        match dimension {
            0 => Lanes::NONE,
            1 => Lanes::X,
            2 => Lanes::XY,
            3 => Lanes::XYZ,
            _ => Lanes::XYZW,
        }
    }

    pub const fn contains(self, index: usize) -> bool {
        index < 4 && self.0 & (1 << index) != 0
    }
}

impl BitOr for Lanes {
    type Output = Lanes;

    fn bitor(self, rhs: Lanes) -> Lanes {
        Lanes(self.0 | rhs.0)
    }
}

impl BitAnd for Lanes {
    type Output = Lanes;

    fn bitand(self, rhs: Lanes) -> Lanes {
        Lanes(self.0 & rhs.0)
    }
}

/// Per-lane boolean result of a comparison on `T` lanes.
#[derive(Copy, Clone)]
pub struct LaneMask<T: Element> {
    bits: LaneBits<T>,
}

/// Mask produced by comparisons on [`F32x4`](crate::simd::F32x4).
pub type Mask32x4 = LaneMask<f32>;

/// Mask produced by comparisons on [`F64x4`](crate::simd::F64x4).
pub type Mask64x4 = LaneMask<f64>;

impl<T: Element> LaneMask<T> {
    const ALL: u8 = 0b1111;

    #[inline(always)]
    fn lane_bits(value: bool) -> T::Bits {
        if value {
            T::Bits::max_value()
        } else {
            T::Bits::zero()
        }
    }

    /// Wraps bits already known to be canonical (hardware compare output).
    #[inline(always)]
    pub(crate) fn from_bits_unchecked(bits: LaneBits<T>) -> Self {
        debug_assert!(
            bits.iter()
                .all(|&lane| lane == T::Bits::zero() || lane == T::Bits::max_value()),
            "Mask lanes must be all ones or all zeros"
        );
        Self { bits }
    }

    #[inline]
    pub fn from_bools(values: [bool; 4]) -> Self {
        Self {
            bits: values.map(Self::lane_bits),
        }
    }

    #[inline]
    pub fn splat(value: bool) -> Self {
        Self::from_bools([value; 4])
    }

    /// True in the lanes of `lanes`.
    #[inline]
    pub fn from_lanes(lanes: Lanes) -> Self {
        Self::from_bools(std::array::from_fn(|i| lanes.contains(i)))
    }

    #[inline(always)]
    pub fn to_bits(self) -> LaneBits<T> {
        self.bits
    }

    #[inline]
    pub fn to_bools(self) -> [bool; 4] {
        self.bits.map(|lane| lane != T::Bits::zero())
    }

    /// Sign bit of each lane packed into the low four bits.
    #[inline]
    pub fn move_mask(self) -> u8 {
        self.bits
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, lane)| {
                acc | (u8::from(lane.leading_zeros() == 0) << i)
            })
    }

    #[inline]
    pub fn all_true(self) -> bool {
        self.move_mask() == Self::ALL
    }

    #[inline]
    pub fn any_true(self) -> bool {
        self.move_mask() != 0
    }

    #[inline]
    pub fn all_false(self) -> bool {
        self.move_mask() == 0
    }

    #[inline]
    pub fn any_false(self) -> bool {
        self.move_mask() != Self::ALL
    }

    /// Some lanes true and some false.
    #[inline]
    pub fn are_mixed(self) -> bool {
        let mask = self.move_mask();
        mask != 0 && mask != Self::ALL
    }

    /// Panics when `index >= 4`.
    #[inline]
    pub fn lane_true(self, index: usize) -> bool {
        self.bits[index] != T::Bits::zero()
    }

    /// Panics when `index >= 4`.
    #[inline]
    pub fn lane_false(self, index: usize) -> bool {
        !self.lane_true(index)
    }

    /// Every lane in `lanes` is true; other lanes are ignored.
    #[inline]
    pub fn all_true_in(self, lanes: Lanes) -> bool {
        self.move_mask() & lanes.bits() == Self::ALL & lanes.bits()
    }

    #[inline]
    pub fn any_true_in(self, lanes: Lanes) -> bool {
        self.move_mask() & lanes.bits() != 0
    }

    #[inline]
    pub fn all_false_in(self, lanes: Lanes) -> bool {
        self.move_mask() & lanes.bits() == 0
    }

    #[inline]
    pub fn any_false_in(self, lanes: Lanes) -> bool {
        self.move_mask() & lanes.bits() != Self::ALL & lanes.bits()
    }

    /// Lanes that are true, as a lane set.
    #[inline]
    pub fn true_lanes(self) -> Lanes {
        Lanes::from_bits(self.move_mask())
    }

    #[inline]
    fn zip(self, rhs: Self, op: impl Fn(T::Bits, T::Bits) -> T::Bits) -> Self {
        Self {
            bits: std::array::from_fn(|i| op(self.bits[i], rhs.bits[i])),
        }
    }
}

impl<T: Element> PartialEq for LaneMask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T: Element> Eq for LaneMask<T> {}

impl<T: Element> Default for LaneMask<T> {
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<T: Element> fmt::Debug for LaneMask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LaneMask").field(&self.to_bools()).finish()
    }
}

impl<T: Element> BitAnd for LaneMask<T> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<T: Element> BitOr for LaneMask<T> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<T: Element> BitXor for LaneMask<T> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<T: Element> Not for LaneMask<T> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self {
            bits: self.bits.map(|lane| !lane),
        }
    }
}

impl<T: Element> BitAndAssign for LaneMask<T> {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<T: Element> BitOrAssign for LaneMask<T> {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
