//! Register construction, memory access, masks and operators.

use lanemath::error::LaneError;
use lanemath::prelude::*;
use lanemath::simd::{Mask32x4, Mask64x4};

#[repr(C, align(32))]
struct Aligned<T>([T; 8]);

#[test]
fn test_partial_loads_zero_fill() {
    let data = [1.0f32, 2.0, 3.0, 4.0];

    for lanes in 1..=4 {
        let v = unsafe { F32x4::load(data.as_ptr(), lanes) };
        let expected: [f32; 4] = std::array::from_fn(|i| if i < lanes { data[i] } else { 0.0 });
        assert_eq!(v.to_array(), expected, "{lanes} lanes");
    }
}

#[test]
fn test_partial_stores_leave_rest_untouched() {
    let v = F64x4::new(1.0, 2.0, 3.0, 4.0);

    for lanes in 1..=4 {
        let mut out = [-1.0f64; 4];
        unsafe { v.store(out.as_mut_ptr(), lanes) };
        let expected: [f64; 4] = std::array::from_fn(|i| if i < lanes { (i + 1) as f64 } else { -1.0 });
        assert_eq!(out, expected, "{lanes} lanes");
    }
}

#[test]
fn test_aligned_round_trip() {
    let mut buffer = Aligned([0.0f64; 8]);
    let v = F64x4::new(5.0, 6.0, 7.0, 8.0);

    unsafe {
        v.store_aligned(buffer.0.as_mut_ptr(), 4);
        assert_eq!(F64x4::load_aligned(buffer.0.as_ptr(), 4), v);
        assert_eq!(F64x4::load_aligned(buffer.0.as_ptr(), 3).w(), 0.0);
    }
}

#[derive(Copy, Clone, Debug)]
enum Layout {
    Plain,
    Unaligned,
    Aligned,
    Checked,
}

impl Layout {
    const ALL: [Layout; 4] = [Layout::Plain, Layout::Unaligned, Layout::Aligned, Layout::Checked];

    /// Element offset into a 32 byte aligned buffer.
    fn offset(self) -> usize {
        match self {
            Layout::Plain | Layout::Unaligned => 1,
            Layout::Aligned | Layout::Checked => 0,
        }
    }
}

macro_rules! round_trip_test {
    ($name:ident, $register:ty, $scalar:ty) => {
        #[test]
        fn $name() {
            let source = Aligned(std::array::from_fn::<$scalar, 8, _>(|i| (i + 1) as $scalar * 1.5));

            for lanes in 1..=4 {
                for layout in Layout::ALL {
                    let offset = layout.offset();
                    let mut target = Aligned([-1.0 as $scalar; 8]);

                    let loaded = unsafe {
                        let src = source.0.as_ptr().add(offset);
                        let dst = target.0.as_mut_ptr().add(offset);
                        match layout {
                            Layout::Plain => {
                                let v = <$register>::load(src, lanes);
                                v.store(dst, lanes);
                                v
                            }
                            Layout::Unaligned => {
                                let v = <$register>::load_unaligned(src, lanes);
                                v.store_unaligned(dst, lanes);
                                v
                            }
                            Layout::Aligned => {
                                let v = <$register>::load_aligned(src, lanes);
                                v.store_aligned(dst, lanes);
                                v
                            }
                            Layout::Checked => {
                                let v = <$register>::load_aligned_checked(src, lanes).unwrap();
                                v.store_aligned_checked(dst, lanes).unwrap();
                                v
                            }
                        }
                    };

                    let window = offset..offset + lanes;
                    let values = loaded.to_array();
                    assert_eq!(&values[..lanes], &source.0[window.clone()], "{layout:?} {lanes} lanes");
                    assert!(values[lanes..].iter().all(|&v| v == 0.0), "{layout:?} {lanes} lanes");

                    for (i, &v) in target.0.iter().enumerate() {
                        let expected = if window.contains(&i) { source.0[i] } else { -1.0 };
                        assert_eq!(v, expected, "{layout:?} {lanes} lanes, element {i}");
                    }
                }
            }
        }
    };
}

round_trip_test!(test_f32_round_trip_every_layout, F32x4, f32);
round_trip_test!(test_f64_round_trip_every_layout, F64x4, f64);

#[test]
fn test_checked_access_reports_misalignment() {
    let mut buffer = Aligned([0.0f32; 8]);
    let misaligned = unsafe { buffer.0.as_ptr().add(1) };

    let error = unsafe { F32x4::load_aligned_checked(misaligned, 4) }.unwrap_err();
    match error {
        LaneError::AccessViolation { address, message } => {
            assert_eq!(address, misaligned as usize);
            assert!(message.contains("16 byte aligned"));
        }
        other => panic!("unexpected error {other:?}"),
    }

    let stored = unsafe { F32x4::splat(1.0).store_aligned_checked(buffer.0.as_mut_ptr(), 4) };
    assert!(stored.is_ok());
    assert_eq!(&buffer.0[..4], &[1.0; 4]);

    let misaligned = unsafe { buffer.0.as_mut_ptr().add(2) };
    assert!(unsafe { F32x4::zero().store_aligned_checked(misaligned, 4) }.is_err());
}

#[test]
fn test_slice_helpers() {
    let v = F32x4::from_slice(&[1.0, 2.0]);
    assert_eq!(v.to_array(), [1.0, 2.0, 0.0, 0.0]);

    let mut out = [0.0f32; 3];
    F32x4::new(9.0, 8.0, 7.0, 6.0).write_to_slice(&mut out);
    assert_eq!(out, [9.0, 8.0, 7.0]);
}

#[test]
fn test_alignment_constants() {
    assert_eq!(F32x4::ALIGNMENT, 16);
    assert_eq!(F64x4::ALIGNMENT, 32);
    assert_eq!(std::mem::align_of::<F32x4>(), 16);
    assert_eq!(std::mem::align_of::<F64x4>(), 32);
}

#[test]
fn test_lane_accessors() {
    let v = F64x4::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
    assert_eq!(v.with_lane(2, 9.0).to_array(), [1.0, 2.0, 9.0, 4.0]);
    assert_eq!(F64x4::from_bits(v.to_bits()), v);
}

#[test]
fn test_mask_predicates() {
    let mask = Mask32x4::from_bools([true, true, false, true]);

    assert!(mask.any_true());
    assert!(mask.any_false());
    assert!(mask.are_mixed());
    assert!(mask.lane_true(0));
    assert!(mask.lane_false(2));
    assert!(mask.all_true_in(Lanes::XY));
    assert!(mask.all_false_in(Lanes::Z));
    assert!(mask.any_false_in(Lanes::XYZ));
    assert!(!mask.any_false_in(Lanes::XY | Lanes::W));
    assert_eq!(mask.move_mask(), 0b1011);
    assert_eq!(mask.true_lanes(), Lanes::XY | Lanes::W);

    assert!(Mask64x4::splat(true).all_true());
    assert!(Mask64x4::default().all_false());
    assert_eq!(!Mask64x4::from_lanes(Lanes::XYZ), Mask64x4::from_lanes(Lanes::W));
}

#[test]
fn test_mask_combinators() {
    let a = Mask32x4::from_lanes(Lanes::XY);
    let b = Mask32x4::from_lanes(Lanes::Y | Lanes::Z);

    assert_eq!((a & b).to_bools(), [false, true, false, false]);
    assert_eq!((a | b).to_bools(), [true, true, true, false]);
    assert_eq!((a ^ b).to_bools(), [true, false, true, false]);
}

#[test]
fn test_operators() {
    let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
    let b = F32x4::splat(2.0);

    assert_eq!((a + b).to_array(), [3.0, 4.0, 5.0, 6.0]);
    assert_eq!((a - b).to_array(), [-1.0, 0.0, 1.0, 2.0]);
    assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0, 8.0]);
    assert_eq!((a / b).to_array(), [0.5, 1.0, 1.5, 2.0]);
    assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);
    assert_eq!((a ^ a).to_array(), [0.0; 4]);
    assert_eq!(!!a, a);

    let mut c = a;
    c += b;
    c *= 0.5;
    assert_eq!(c.to_array(), [1.5, 2.0, 2.5, 3.0]);
}

#[test]
fn test_register_math_methods() {
    let v = F64x4::new(-4.0, 9.0, -0.5, 2.5);

    assert_eq!(v.abs().to_array(), [4.0, 9.0, 0.5, 2.5]);
    assert_eq!(v.abs().sqrt().to_array(), [2.0, 3.0, 0.5f64.sqrt(), 2.5f64.sqrt()]);
    assert_eq!(v.round().to_array(), [-4.0, 9.0, -0.0, 2.0]);
    assert_eq!(v.floor().to_array(), [-4.0, 9.0, -1.0, 2.0]);
    assert_eq!(v.truncate().to_array(), [-4.0, 9.0, 0.0, 2.0]);
    assert_eq!(
        v.clamp(F64x4::splat(-1.0), F64x4::splat(1.0)).to_array(),
        [-1.0, 1.0, -0.5, 1.0]
    );

    let mask = v.compare_lt(F64x4::zero());
    assert_eq!(mask.to_bools(), [true, false, true, false]);
    assert_eq!(F64x4::select(mask, F64x4::zero(), v).to_array(), [0.0, 9.0, 0.0, 2.5]);
}
