//! Vector geometry on 2, 3 and 4 leading lanes.
//!
//! Scalar results (dot products, lengths, the 2D cross product) come back
//! broadcast into every lane so they compose with other register operations
//! directly. Zero length vectors are not special-cased: normalizing one
//! yields NaN lanes.

#[cfg(arm_simd)]
use crate::simd::neon;
#[cfg(x86_simd)]
use crate::simd::{avx, sse};

use num::{One, Zero};

use crate::ops::Fused;
use crate::simd::dispatch::dispatch;
use crate::simd::{scalar, Dispatcher, ElementKind, F32x4, F64x4, Lanes, Operation, SimdRegister};

/// Generates `length`, `length_squared`, `normalize`, `distance`,
/// `distance_squared` and `reflect` for one dimension on top of its dot product.
macro_rules! dimension_kernels {
    ($dim:literal, $dot:ident, $length:ident, $length_squared:ident, $normalize:ident,
     $distance:ident, $distance_squared:ident, $reflect:ident) => {
        #[doc = concat!("`sqrt(dot(v, v))` over ", $dim, " lanes, broadcast.")]
        #[inline]
        fn $length(&self, value: R) -> R {
            self.sqrt(self.$dot(value, value))
        }

        #[doc = concat!("`dot(v, v)` over ", $dim, " lanes, broadcast.")]
        #[inline]
        fn $length_squared(&self, value: R) -> R {
            self.$dot(value, value)
        }

        #[doc = concat!("`v / length(v)` over ", $dim, " lanes.")]
        #[inline]
        fn $normalize(&self, value: R) -> R {
            self.divide(value, self.$length(value))
        }

        #[inline]
        fn $distance(&self, from: R, to: R) -> R {
            self.$length(self.subtract(from, to))
        }

        #[inline]
        fn $distance_squared(&self, from: R, to: R) -> R {
            self.$length_squared(self.subtract(from, to))
        }

        #[doc = concat!("`incident - 2 * dot(incident, normal) * normal` over ", $dim, " lanes.")]
        #[inline]
        fn $reflect(&self, incident: R, normal: R) -> R {
            let projection = self.$dot(incident, normal);
            let twice = self.add(projection, projection);
            self.subtract(incident, self.multiply(twice, normal))
        }
    };
}

pub trait Geometry<R: SimdRegister>: Fused<R> {
    fn dot2d(&self, left: R, right: R) -> R;

    fn dot3d(&self, left: R, right: R) -> R;

    fn dot4d(&self, left: R, right: R) -> R;

    /// `x1 * y2 - y1 * x2`, broadcast.
    fn cross2d(&self, left: R, right: R) -> R;

    /// `(y1 z2 - z1 y2, z1 x2 - x1 z2, x1 y2 - y1 x2, 0)`
    fn cross3d(&self, left: R, right: R) -> R;

    /// The vector orthogonal to all three inputs.
    ///
    /// Always computed with the scalar expansion.
    #[inline]
    fn cross4d(&self, one: R, two: R, three: R) -> R {
        scalar::cross4d(one, two, three)
    }

    dimension_kernels!(2, dot2d, length2d, length_squared2d, normalize2d,
        distance2d, distance_squared2d, reflect2d);

    dimension_kernels!(3, dot3d, length3d, length_squared3d, normalize3d,
        distance3d, distance_squared3d, reflect3d);

    dimension_kernels!(4, dot4d, length4d, length_squared4d, normalize4d,
        distance4d, distance_squared4d, reflect4d);

    /// `from + (to - from) * weight` with a per-lane weight in `0..=1`.
    ///
    /// The weight range is only checked in debug builds.
    #[inline]
    fn lerp(&self, from: R, to: R, weight: R) -> R {
        debug_assert!(
            weight
                .to_array()
                .iter()
                .all(|w| *w >= <R::Scalar as Zero>::zero() && *w <= <R::Scalar as One>::one()),
            "Weight must be in 0..=1"
        );
        self.fast_multiply_add(self.subtract(to, from), weight, from)
    }

    #[inline]
    fn lerp_scalar(&self, from: R, to: R, weight: R::Scalar) -> R {
        self.lerp(from, to, R::splat(weight))
    }
}

impl Geometry<F32x4> for Dispatcher {
    #[inline]
    fn dot2d(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Dot, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::dot_sse41(left, right, Lanes::XY),
            #[cfg(x86_simd)] Sse3 => sse::f32x4::dot_sse3(left, right, Lanes::XY),
            #[cfg(x86_simd)] Sse => sse::f32x4::dot_sse(left, right, Lanes::XY),
            #[cfg(arm_simd)] Neon => neon::f32x4::dot(left, right, Lanes::XY),
            _ => scalar::dot(left, right, Lanes::XY),
        )
    }

    #[inline]
    fn dot3d(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Dot, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::dot_sse41(left, right, Lanes::XYZ),
            #[cfg(x86_simd)] Sse3 => sse::f32x4::dot_sse3(left, right, Lanes::XYZ),
            #[cfg(x86_simd)] Sse => sse::f32x4::dot_sse(left, right, Lanes::XYZ),
            #[cfg(arm_simd)] Neon => neon::f32x4::dot(left, right, Lanes::XYZ),
            _ => scalar::dot(left, right, Lanes::XYZ),
        )
    }

    #[inline]
    fn dot4d(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Dot, ElementKind::F32;
            #[cfg(x86_simd)] Sse41 => sse::f32x4::dot_sse41(left, right, Lanes::XYZW),
            #[cfg(x86_simd)] Sse3 => sse::f32x4::dot_sse3(left, right, Lanes::XYZW),
            #[cfg(x86_simd)] Sse => sse::f32x4::dot_sse(left, right, Lanes::XYZW),
            #[cfg(arm_simd)] Neon => neon::f32x4::dot(left, right, Lanes::XYZW),
            _ => scalar::dot(left, right, Lanes::XYZW),
        )
    }

    #[inline]
    fn cross2d(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Cross2D, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::cross2d(left, right),
            _ => scalar::cross2d(left, right),
        )
    }

    #[inline]
    fn cross3d(&self, left: F32x4, right: F32x4) -> F32x4 {
        dispatch!(self, Operation::Cross3D, ElementKind::F32;
            #[cfg(x86_simd)] Sse => sse::f32x4::cross3d(left, right),
            _ => scalar::cross3d(left, right),
        )
    }
}

impl Geometry<F64x4> for Dispatcher {
    #[inline]
    fn dot2d(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Dot, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::dot(left, right, Lanes::XY),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::dot(left, right, Lanes::XY),
            #[cfg(arm_simd)] Neon => neon::f64x4::dot(left, right, Lanes::XY),
            _ => scalar::dot(left, right, Lanes::XY),
        )
    }

    #[inline]
    fn dot3d(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Dot, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::dot(left, right, Lanes::XYZ),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::dot(left, right, Lanes::XYZ),
            #[cfg(arm_simd)] Neon => neon::f64x4::dot(left, right, Lanes::XYZ),
            _ => scalar::dot(left, right, Lanes::XYZ),
        )
    }

    #[inline]
    fn dot4d(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Dot, ElementKind::F64;
            #[cfg(x86_simd)] Avx => avx::f64x4::dot(left, right, Lanes::XYZW),
            #[cfg(x86_simd)] Sse2 => sse::f64x4::dot(left, right, Lanes::XYZW),
            #[cfg(arm_simd)] Neon => neon::f64x4::dot(left, right, Lanes::XYZW),
            _ => scalar::dot(left, right, Lanes::XYZW),
        )
    }

    #[inline]
    fn cross2d(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Cross2D, ElementKind::F64;
            #[cfg(x86_simd)] Sse2 => sse::f64x4::cross2d(left, right),
            _ => scalar::cross2d(left, right),
        )
    }

    #[inline]
    fn cross3d(&self, left: F64x4, right: F64x4) -> F64x4 {
        dispatch!(self, Operation::Cross3D, ElementKind::F64;
            #[cfg(x86_simd)] Avx2 => avx::f64x4::cross3d(left, right),
            _ => scalar::cross3d(left, right),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod scenario_tests {
        use super::*;

        #[test]
        fn test_dot3d_ignores_w() {
            let a = F32x4::new(1.0, 2.0, 3.0, 99.0);
            let b = F32x4::new(4.0, 5.0, 6.0, -7.0);

            for d in Dispatcher::default().ladder() {
                assert_eq!(d.dot3d(a, b).to_array(), [32.0; 4], "{:?}", d.capabilities());
            }
        }

        #[test]
        fn test_dot2d_ignores_z_and_w() {
            let a = F64x4::new(1.0, 2.0, f64::NAN, f64::INFINITY);
            let b = F64x4::new(3.0, 4.0, 5.0, 6.0);

            for d in Dispatcher::default().ladder() {
                assert_eq!(d.dot2d(a, b).to_array(), [11.0; 4], "{:?}", d.capabilities());
            }
        }

        #[test]
        fn test_cross3d_of_axes() {
            for d in Dispatcher::default().ladder() {
                let x = F32x4::new(1.0, 0.0, 0.0, 5.0);
                let y = F32x4::new(0.0, 1.0, 0.0, 7.0);
                assert_eq!(d.cross3d(x, y).to_array(), [0.0, 0.0, 1.0, 0.0]);

                let x = F64x4::new(1.0, 0.0, 0.0, 5.0);
                let y = F64x4::new(0.0, 1.0, 0.0, 7.0);
                assert_eq!(d.cross3d(x, y).to_array(), [0.0, 0.0, 1.0, 0.0]);
            }
        }

        #[test]
        fn test_cross2d_broadcasts() {
            for d in Dispatcher::default().ladder() {
                let a = F64x4::new(3.0, 2.0, 100.0, 100.0);
                let b = F64x4::new(1.0, 4.0, -100.0, 100.0);
                assert_eq!(d.cross2d(a, b).to_array(), [10.0; 4]);
            }
        }

        #[test]
        fn test_lerp_midpoint() {
            let d = Dispatcher::default();
            let mid = d.lerp_scalar(F32x4::zero(), F32x4::splat(10.0), 0.5);
            assert_eq!(mid.to_array(), [5.0; 4]);
        }

        #[test]
        fn test_cross4d_of_basis_vectors() {
            let d = Dispatcher::default();
            let x = F64x4::new(1.0, 0.0, 0.0, 0.0);
            let y = F64x4::new(0.0, 1.0, 0.0, 0.0);
            let z = F64x4::new(0.0, 0.0, 1.0, 0.0);
            let w = d.cross4d(x, y, z);

            assert_eq!(&w.to_array()[..3], &[0.0; 3]);
            assert_eq!(w.w().abs(), 1.0);
        }
    }

    mod derived_tests {
        use super::*;

        #[test]
        fn test_length_and_normalize() {
            let d = Dispatcher::default();
            let v = F32x4::new(3.0, 4.0, 12.0, 0.0);

            assert_eq!(d.length2d(v).x(), 5.0);
            assert_eq!(d.length3d(v).x(), 13.0);
            assert_eq!(d.length_squared3d(v).x(), 169.0);

            let n = d.normalize2d(v);
            assert!((n.x() - 0.6).abs() < 1e-6);
            assert!((n.y() - 0.8).abs() < 1e-6);
        }

        #[test]
        fn test_normalize_zero_vector_is_nan() {
            let d = Dispatcher::default();
            let n = d.normalize3d(F64x4::zero()).to_array();
            assert!(n[..3].iter().all(|lane| lane.is_nan()));
        }

        #[test]
        fn test_distance() {
            let d = Dispatcher::default();
            let a = F64x4::new(1.0, 1.0, 1.0, 1.0);
            let b = F64x4::new(4.0, 5.0, 1.0, 9.0);

            assert_eq!(d.distance2d(a, b).x(), 5.0);
            assert_eq!(d.distance_squared3d(a, b).x(), 25.0);
            assert_eq!(d.distance_squared4d(a, b).x(), 89.0);
        }

        #[test]
        fn test_reflect() {
            let d = Dispatcher::default();
            let incident = F32x4::new(1.0, -1.0, 0.0, 0.0);
            let normal = F32x4::new(0.0, 1.0, 0.0, 0.0);

            assert_eq!(d.reflect2d(incident, normal).to_array(), [1.0, 1.0, 0.0, 0.0]);
            assert_eq!(d.reflect3d(incident, normal).to_array(), [1.0, 1.0, 0.0, 0.0]);
        }
    }

    #[cfg(debug_assertions)]
    mod debug_assertion_tests {
        use super::*;

        #[test]
        #[should_panic(expected = "Weight must be in 0..=1")]
        fn test_lerp_rejects_weight_outside_unit_range() {
            let d = Dispatcher::default();
            let _ = d.lerp_scalar(F32x4::zero(), F32x4::splat(1.0), 1.5);
        }
    }
}
