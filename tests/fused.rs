//! Fused multiply-add family and the precision policy.

use lanemath::error::{LaneError, FMA_NOT_SUPPORTED};
use lanemath::options::MathOptions;
use lanemath::prelude::*;
use lanemath::simd::{Capability, CapabilitySet, ElementKind, Operation, Path};

/// `x * y + z` where the unfused product loses the low bits.
fn single_rounding_case() -> (F64x4, F64x4, F64x4) {
    let e = f64::EPSILON;
    (
        F64x4::splat(1.0 + e),
        F64x4::splat(1.0 - e),
        F64x4::splat(-1.0),
    )
}

#[test]
fn test_fused_multiply_add_rounds_once() {
    let (x, y, z) = single_rounding_case();
    let expected = -f64::EPSILON * f64::EPSILON;

    for d in Dispatcher::default().ladder() {
        assert_eq!(d.fused_multiply_add(x, y, z).to_array(), [expected; 4]);
    }
}

#[test]
fn test_strict_fast_family_rounds_twice() {
    let (x, y, z) = single_rounding_case();

    for d in Dispatcher::new(MathOptions::strict()).ladder() {
        assert!(!d.can_fuse_operations());
        assert_eq!(d.fast_multiply_add(x, y, z).to_array(), [0.0; 4]);
        assert_eq!(
            d.fast_negate_multiply_add(x, y, F64x4::splat(1.0)).to_array(),
            [0.0; 4]
        );
    }
}

#[test]
fn test_fast_family_fuses_only_with_hardware_fma() {
    let d = Dispatcher::default();
    let native = d.path(Operation::Fused, ElementKind::F32).is_native();
    assert_eq!(d.can_fuse_operations(), native);
    assert_eq!(Fused::<F32x4>::fuses_fast_operations(&d), native);
    assert_eq!(Fused::<F64x4>::fuses_fast_operations(&d), native);

    let scalar = Dispatcher::scalar(MathOptions::default());
    assert!(!scalar.can_fuse_operations());
    assert!(!Fused::<F64x4>::fuses_fast_operations(&scalar));
}

#[test]
fn test_negated_variants_without_fma() {
    let d = Dispatcher::scalar(MathOptions::default());
    let v = F32x4::splat(2.0);

    let error = d.fused_negate_multiply_add(v, v, v).unwrap_err();
    assert_eq!(
        error,
        LaneError::PlatformNotSupported {
            message: FMA_NOT_SUPPORTED.to_string()
        }
    );
    assert!(d.fused_negate_multiply_subtract(F64x4::splat(1.0), F64x4::splat(1.0), F64x4::splat(1.0)).is_err());
    assert!(matches!(
        d.require_native(Operation::FusedNegated, ElementKind::F64),
        Err(LaneError::PlatformNotSupported { .. })
    ));

    // The fast family falls back instead of failing.
    assert_eq!(d.fast_negate_multiply_add(v, v, v).to_array(), [-2.0; 4]);
    assert_eq!(d.fast_negate_multiply_subtract(v, v, v).to_array(), [-6.0; 4]);
}

#[test]
fn test_negated_variants_with_fma() {
    let d = Dispatcher::default();
    if d.path(Operation::FusedNegated, ElementKind::F32) == Path::Software {
        return;
    }

    let x = F32x4::new(1.0, 2.0, 3.0, 4.0);
    let y = F32x4::splat(2.0);
    let z = F32x4::splat(1.0);

    assert_eq!(d.fused_negate_multiply_add(x, y, z), Ok(F32x4::new(-1.0, -3.0, -5.0, -7.0)));
    assert_eq!(d.fused_negate_multiply_subtract(x, y, z), Ok(F32x4::new(-3.0, -5.0, -7.0, -9.0)));
}

#[test]
fn test_alternating_variants() {
    let x = F64x4::new(1.0, 2.0, 3.0, 4.0);
    let y = F64x4::splat(10.0);
    let z = F64x4::splat(1.0);

    for d in Dispatcher::default().ladder() {
        assert_eq!(
            d.fused_multiply_add_subtract_alternating(x, y, z).to_array(),
            [9.0, 21.0, 29.0, 41.0]
        );
        assert_eq!(
            d.fused_multiply_subtract_add_alternating(x, y, z).to_array(),
            [11.0, 19.0, 31.0, 39.0]
        );
        assert_eq!(
            d.fast_multiply_add_subtract_alternating(x, y, z),
            d.fused_multiply_add_subtract_alternating(x, y, z)
        );
    }
}

#[test]
fn test_fused_multiply_subtract_is_emulated() {
    let d = Dispatcher::default().restricted(CapabilitySet::empty().with(Capability::Sse2));
    let v = F64x4::new(1.5, -2.0, 0.0, 8.0);

    assert_eq!(
        d.fused_multiply_subtract(v, F64x4::splat(2.0), F64x4::splat(1.0)).to_array(),
        [2.0, -5.0, -1.0, 15.0]
    );
    assert_eq!(v.mul_add(F64x4::splat(2.0), F64x4::splat(1.0)).to_array(), [4.0, -3.0, 1.0, 17.0]);
}
