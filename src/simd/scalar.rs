//! Software kernels, generic over the register type.
//!
//! These are the last strategy of every dispatched operation and the
//! reference the native kernels are tested against. Each one reproduces the
//! observable behaviour of the matching instruction, including its quirks:
//! `min`/`max` return the second operand when either lane is NaN, and the
//! dot products sum pairwise, `(p0 + p1) + (p2 + p3)`.

use std::array;

use num::{Float, Zero};

use crate::simd::mask::{LaneMask, Lanes};
use crate::simd::traits::{Element, SimdRegister};

type Lane<R> = <R as SimdRegister>::Scalar;
type Bits<R> = <Lane<R> as Element>::Bits;

#[inline(always)]
fn map<R: SimdRegister>(value: R, op: impl Fn(Lane<R>) -> Lane<R>) -> R {
    R::from_array(value.to_array().map(op))
}

#[inline(always)]
fn zip<R: SimdRegister>(left: R, right: R, op: impl Fn(Lane<R>, Lane<R>) -> Lane<R>) -> R {
    let (l, r) = (left.to_array(), right.to_array());
    R::from_array(array::from_fn(|i| op(l[i], r[i])))
}

#[inline(always)]
fn zip_bits<R: SimdRegister>(left: R, right: R, op: impl Fn(Bits<R>, Bits<R>) -> Bits<R>) -> R {
    let (l, r) = (left.to_bits(), right.to_bits());
    R::from_bits(array::from_fn(|i| op(l[i], r[i])))
}

#[inline(always)]
fn compare<R: SimdRegister>(
    left: R,
    right: R,
    op: impl Fn(Lane<R>, Lane<R>) -> bool,
) -> LaneMask<Lane<R>> {
    let (l, r) = (left.to_array(), right.to_array());
    LaneMask::from_bools(array::from_fn(|i| op(l[i], r[i])))
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

pub fn add<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| a + b)
}

pub fn subtract<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| a - b)
}

pub fn multiply<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| a * b)
}

pub fn divide<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| a / b)
}

pub fn sqrt<R: SimdRegister>(value: R) -> R {
    map(value, Float::sqrt)
}

/// `a < b ? a : b` per lane, so NaN in either lane yields `b`.
pub fn min<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| if a < b { a } else { b })
}

/// `a > b ? a : b` per lane, so NaN in either lane yields `b`.
pub fn max<R: SimdRegister>(left: R, right: R) -> R {
    zip(left, right, |a, b| if a > b { a } else { b })
}

/// `(l0 + l1, l2 + l3, r0 + r1, r2 + r3)`
pub fn horizontal_add<R: SimdRegister>(left: R, right: R) -> R {
    let (l, r) = (left.to_array(), right.to_array());
    R::from_array([l[0] + l[1], l[2] + l[3], r[0] + r[1], r[2] + r[3]])
}

pub fn round<R: SimdRegister>(value: R) -> R {
    map(value, Element::round_ties_even)
}

pub fn floor<R: SimdRegister>(value: R) -> R {
    map(value, Float::floor)
}

pub fn truncate<R: SimdRegister>(value: R) -> R {
    map(value, Float::trunc)
}

// ================================================================================================
// BITWISE
// ================================================================================================

pub fn and<R: SimdRegister>(left: R, right: R) -> R {
    zip_bits(left, right, |a, b| a & b)
}

pub fn or<R: SimdRegister>(left: R, right: R) -> R {
    zip_bits(left, right, |a, b| a | b)
}

pub fn xor<R: SimdRegister>(left: R, right: R) -> R {
    zip_bits(left, right, |a, b| a ^ b)
}

/// `!left & right`
pub fn and_not<R: SimdRegister>(left: R, right: R) -> R {
    zip_bits(left, right, |a, b| !a & b)
}

pub fn not<R: SimdRegister>(value: R) -> R {
    R::from_bits(value.to_bits().map(|lane| !lane))
}

// ================================================================================================
// COMPARISON
// ================================================================================================

pub fn compare_eq<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a == b)
}

/// Unordered: NaN lanes compare not-equal.
pub fn compare_ne<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a != b)
}

pub fn compare_gt<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a > b)
}

pub fn compare_lt<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a < b)
}

pub fn compare_ge<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a >= b)
}

pub fn compare_le<R: SimdRegister>(left: R, right: R) -> LaneMask<Lane<R>> {
    compare(left, right, |a, b| a <= b)
}

// ================================================================================================
// GEOMETRY
// ================================================================================================

/// Sum of the products of the lanes in `lanes`, broadcast to every lane.
///
/// Summed pairwise, `(p0 + p1) + (p2 + p3)` with inactive products zero,
/// which is the order of the hardware dot and reduction instructions.
pub fn dot<R: SimdRegister>(left: R, right: R, lanes: Lanes) -> R {
    let (l, r) = (left.to_array(), right.to_array());
    let p: [Lane<R>; 4] = array::from_fn(|i| {
        if lanes.contains(i) {
            l[i] * r[i]
        } else {
            R::Scalar::zero()
        }
    });
    R::splat((p[0] + p[1]) + (p[2] + p[3]))
}

/// `x1 * y2 - y1 * x2`, broadcast.
pub fn cross2d<R: SimdRegister>(left: R, right: R) -> R {
    let (a, b) = (left.to_array(), right.to_array());
    R::splat(a[0] * b[1] - a[1] * b[0])
}

/// Zeroes W.
pub fn cross3d<R: SimdRegister>(left: R, right: R) -> R {
    let (a, b) = (left.to_array(), right.to_array());
    R::from_array([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
        R::Scalar::zero(),
    ])
}

/// Four dimensional cross product: the vector orthogonal to all three inputs.
pub fn cross4d<R: SimdRegister>(one: R, two: R, three: R) -> R {
    let [x1, y1, z1, w1] = one.to_array();
    let [x2, y2, z2, w2] = two.to_array();
    let [x3, y3, z3, w3] = three.to_array();

    let x = (z2 * w3 - w2 * z3) * y1 - (y2 * w3 - w2 * y3) * z1 + (y2 * z3 - z2 * y3) * w1;
    let y = (w2 * z3 - z2 * w3) * x1 - (w2 * x3 - x2 * w3) * z1 + (z2 * x3 - x2 * z3) * w1;
    let z = (y2 * w3 - w2 * y3) * x1 - (x2 * w3 - w2 * x3) * y1 + (x2 * y3 - y2 * x3) * w1;
    let w = (z2 * y3 - y2 * z3) * x1 - (z2 * x3 - x2 * z3) * y1 + (y2 * x3 - x2 * y3) * z1;

    R::from_array([x, y, z, w])
}

// ================================================================================================
// FUSED
// ================================================================================================

/// `x * y + z` with a single rounding per lane.
pub fn fused_multiply_add<R: SimdRegister>(x: R, y: R, z: R) -> R {
    let (x, y, z) = (x.to_array(), y.to_array(), z.to_array());
    R::from_array(array::from_fn(|i| x[i].mul_add(y[i], z[i])))
}

/// `x * y - z` with a single rounding per lane.
pub fn fused_multiply_subtract<R: SimdRegister>(x: R, y: R, z: R) -> R {
    let (x, y, z) = (x.to_array(), y.to_array(), z.to_array());
    R::from_array(array::from_fn(|i| x[i].mul_add(y[i], -z[i])))
}

/// `x * y - z` in X and Z, `x * y + z` in Y and W.
pub fn fused_multiply_add_subtract_alternating<R: SimdRegister>(x: R, y: R, z: R) -> R {
    fused_multiply_add(x, y, xor(z, R::sign_mask_in(Lanes::X | Lanes::Z)))
}

/// `x * y + z` in X and Z, `x * y - z` in Y and W.
pub fn fused_multiply_subtract_add_alternating<R: SimdRegister>(x: R, y: R, z: R) -> R {
    fused_multiply_add(x, y, xor(z, R::sign_mask_in(Lanes::Y | Lanes::W)))
}
