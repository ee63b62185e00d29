//! Sine, cosine and tangent by range reduction and minimax polynomials.
//!
//! Sine and cosine reduce the argument modulo 2π, fold it into
//! `[-π/2, π/2]` (remembering whether the fold flipped the cosine sign) and
//! evaluate an even polynomial in `x²` with Horner's scheme on the `fast_*`
//! fused family. The `*_estimate` variants use shorter polynomials: they are
//! meant to be less precise.
//!
//! All polynomials carry single precision coefficients, so the `f64`
//! register computes faster but not more accurately than the `f32` one.

use std::f64::consts::{FRAC_1_PI, FRAC_2_PI, FRAC_PI_2, PI, TAU};

use crate::ops::Fused;
use crate::simd::mask::LaneMask;
use crate::simd::SimdRegister;

/// Polynomial coefficient tables, highest degree first.
pub mod coefficients {
    /// Bumped whenever a table below changes.
    pub const COEFFICIENT_TABLE_VERSION: u32 = 1;

    /// Degree 11 odd sine, as a polynomial in `x²` times `x`.
    #[allow(clippy::excessive_precision)]
    pub const SIN: [f64; 6] = [
        -2.3889859e-08,
        2.7525562e-06,
        -0.00019840874,
        0.0083333310,
        -0.16666667,
        1.0,
    ];

    /// Degree 7 odd sine.
    #[allow(clippy::excessive_precision)]
    pub const SIN_ESTIMATE: [f64; 4] = [-0.00018524670, 0.0083139502, -0.16665852, 1.0];

    /// Degree 10 even cosine, as a polynomial in `x²`.
    #[allow(clippy::excessive_precision)]
    pub const COS: [f64; 6] = [
        -2.6051615e-07,
        2.4760495e-05,
        -0.0013888378,
        0.041666638,
        -0.5,
        1.0,
    ];

    /// Degree 6 even cosine.
    #[allow(clippy::excessive_precision)]
    pub const COS_ESTIMATE: [f64; 4] = [-0.0012712436, 0.041493919, -0.49992746, 1.0];

    /// Rational tangent on `[-π/4, π/4]`: `T0..=T4` form the denominator,
    /// `T5..=T7` the numerator.
    #[allow(clippy::excessive_precision)]
    pub const TAN: [f64; 8] = [
        1.0,
        -4.667168334e-1,
        2.566383229e-2,
        -3.118153191e-4,
        4.981943399e-7,
        -1.333835001e-1,
        3.424887824e-3,
        -1.786170734e-5,
    ];

    /// Low order rational tangent on `[-π/2, π/2]`.
    #[allow(clippy::excessive_precision)]
    pub const TAN_ESTIMATE: [f64; 3] = [2.484, -1.954923183e-1, 2.467401101];
}

use coefficients::{COS, COS_ESTIMATE, SIN, SIN_ESTIMATE, TAN, TAN_ESTIMATE};

/// π/2 split in two so `v - k·π/2` keeps the bits the first product rounds off.
#[allow(clippy::excessive_precision)]
const FRAC_PI_2_HIGH: f64 = 1.570796371;
#[allow(clippy::excessive_precision)]
const FRAC_PI_2_LOW: f64 = 6.077100628e-11;

/// Below this magnitude `tan(x) = x` to working precision.
const TAN_EPSILON: f64 = 0.000244140625;

/// `c[0]·x^(n-1) + … + c[n-1]`
#[inline(always)]
fn horner<R, D>(kernels: &D, x: R, coefficients: &[f64]) -> R
where
    R: SimdRegister,
    D: Fused<R> + ?Sized,
{
    coefficients[1..]
        .iter()
        .fold(R::constant(coefficients[0]), |acc, &c| {
            kernels.fast_multiply_add(acc, x, R::constant(c))
        })
}

pub trait Trigonometry<R: SimdRegister>: Fused<R> {
    /// `value - round(value / 2π) · 2π`, in `[-π, π]`.
    #[inline]
    fn mod_2pi(&self, value: R) -> R {
        let quotient = self.round(self.multiply(value, R::constant(1.0 / TAU)));
        self.fast_negate_multiply_add(quotient, R::constant(TAU), value)
    }

    #[inline]
    fn sin(&self, value: R) -> R {
        let (x, _) = fold_quadrant(self, value);
        self.multiply(horner(self, self.square(x), &SIN), x)
    }

    #[inline]
    fn cos(&self, value: R) -> R {
        let (x, sign) = fold_quadrant(self, value);
        self.multiply(horner(self, self.square(x), &COS), sign)
    }

    /// Both at the cost of one range reduction.
    #[inline]
    fn sin_cos(&self, value: R) -> (R, R) {
        let (x, sign) = fold_quadrant(self, value);
        let x2 = self.square(x);
        (
            self.multiply(horner(self, x2, &SIN), x),
            self.multiply(horner(self, x2, &COS), sign),
        )
    }

    #[inline]
    fn sin_estimate(&self, value: R) -> R {
        let (x, _) = fold_quadrant(self, value);
        self.multiply(horner(self, self.square(x), &SIN_ESTIMATE), x)
    }

    #[inline]
    fn cos_estimate(&self, value: R) -> R {
        let (x, sign) = fold_quadrant(self, value);
        self.multiply(horner(self, self.square(x), &COS_ESTIMATE), sign)
    }

    #[inline]
    fn sin_cos_estimate(&self, value: R) -> (R, R) {
        let (x, sign) = fold_quadrant(self, value);
        let x2 = self.square(x);
        (
            self.multiply(horner(self, x2, &SIN_ESTIMATE), x),
            self.multiply(horner(self, x2, &COS_ESTIMATE), sign),
        )
    }

    /// Reduces by π/2 and evaluates a rational approximation, taking the
    /// negative reciprocal in odd quadrants. Both zeros map to `+0.0`, so the
    /// sign of a negative zero is not kept.
    fn tan(&self, value: R) -> R {
        let t = TAN.map(R::constant);

        let quadrant = self.round(self.multiply(value, R::constant(FRAC_2_PI)));
        let x = self.fast_negate_multiply_add(quadrant, R::constant(FRAC_PI_2_HIGH), value);
        let x = self.fast_negate_multiply_add(quadrant, R::constant(FRAC_PI_2_LOW), x);

        let half = self.multiply(self.abs(quadrant), R::constant(0.5));
        let even = self.compare_eq(self.truncate(half), half);

        let x2 = self.square(x);
        let numerator = self.fast_multiply_add(x2, t[7], t[6]);
        let denominator = self.fast_multiply_add(x2, t[4], t[3]);
        let numerator = self.fast_multiply_add(x2, numerator, t[5]);
        let denominator = self.fast_multiply_add(x2, denominator, t[2]);
        let numerator = self.multiply(x2, numerator);
        let denominator = self.fast_multiply_add(x2, denominator, t[1]);
        let numerator = self.fast_multiply_add(x, numerator, x);
        let denominator = self.fast_multiply_add(x2, denominator, t[0]);

        let tiny = self.in_bounds(x, R::constant(TAN_EPSILON));
        let numerator = self.select(tiny, x, numerator);
        let denominator = self.select(tiny, t[0], denominator);

        let odd = self.divide(denominator, self.negate(numerator));
        let result = self.select(even, self.divide(numerator, denominator), odd);
        self.select(self.compare_eq(value, R::zero()), R::zero(), result)
    }

    /// Reduces by π and evaluates `x (a + b x²) / (c - x²)`.
    fn tan_estimate(&self, value: R) -> R {
        let [t0, t1, t2] = TAN_ESTIMATE.map(R::constant);

        let turns = self.round(self.multiply(value, R::constant(FRAC_1_PI)));
        let x = self.fast_negate_multiply_add(R::constant(PI), turns, value);
        let x2 = self.square(x);

        let denominator = self.reciprocal(self.subtract(t2, x2));
        let numerator = self.fast_multiply_add(x2, self.multiply(x, t1), self.multiply(x, t0));
        self.multiply(numerator, denominator)
    }
}

impl<R: SimdRegister, D: Fused<R> + ?Sized> Trigonometry<R> for D {}

/// Reduces `value` into `[-π/2, π/2]`.
///
/// Returns the folded angle and `±1` per lane: `-1` where the fold reflected
/// the angle through `±π/2`, which flips the sign of the cosine but not the sine.
#[inline(always)]
fn fold_quadrant<R, D>(kernels: &D, value: R) -> (R, R)
where
    R: SimdRegister,
    D: Trigonometry<R> + ?Sized,
{
    let x = kernels.mod_2pi(value);

    let sign = kernels.and(x, R::sign_mask());
    let pi = kernels.or(R::constant(PI), sign);
    let magnitude = kernels.and_not(sign, x);
    let reflected = kernels.subtract(pi, x);

    let within: LaneMask<R::Scalar> = kernels.compare_le(magnitude, R::constant(FRAC_PI_2));
    (
        kernels.select(within, x, reflected),
        kernels.select(within, R::constant(1.0), R::constant(-1.0)),
    )
}
