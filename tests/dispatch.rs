//! Capability probing, strategy selection and global configuration.

use lanemath::error::LaneError;
use lanemath::options::MathOptions;
use lanemath::simd::{Capability, CapabilitySet, Dispatcher, ElementKind, Operation, Path};

#[test]
fn test_dispatcher_never_exceeds_hardware() {
    let detected = CapabilitySet::probe();
    let d = Dispatcher::default();

    for capability in d.capabilities().iter() {
        assert!(detected.contains(capability), "{capability} not detected");
    }

    let widened = d.restricted(CapabilitySet::empty().union(
        Capability::ALL.into_iter().collect(),
    ));
    assert_eq!(widened.capabilities(), d.capabilities());
}

#[test]
fn test_path_follows_candidate_order() {
    let d = Dispatcher::default();

    for operation in Operation::ALL {
        for kind in [ElementKind::F32, ElementKind::F64] {
            let expected = operation
                .candidates(kind)
                .iter()
                .copied()
                .find(|c| d.capabilities().contains(*c));

            match (d.path(operation, kind), expected) {
                (Path::Native(chosen), Some(first)) => assert_eq!(chosen, first),
                (Path::Software, None) => {}
                (path, expected) => panic!("{operation:?}/{kind:?}: {path:?} vs {expected:?}"),
            }
        }
    }
}

#[test]
fn test_scalar_dispatcher_is_all_software() {
    let d = Dispatcher::scalar(MathOptions::default());

    for operation in Operation::ALL {
        assert_eq!(d.path(operation, ElementKind::F32), Path::Software);
        assert_eq!(d.path(operation, ElementKind::F64), Path::Software);
    }
}

#[test]
fn test_require_native_errors() {
    let d = Dispatcher::default();

    assert_eq!(
        d.require_native(Operation::Cross4D, ElementKind::F32),
        Err(LaneError::NotImplemented { operation: Operation::Cross4D.name() })
    );

    let scalar = Dispatcher::scalar(MathOptions::default());
    match scalar.require_native(Operation::Dot, ElementKind::F64) {
        Err(LaneError::PlatformNotSupported { message }) => {
            assert!(message.contains(Operation::Dot.name()));
            assert!(message.contains("f64"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_ladder_strips_one_tier_at_a_time() {
    let rungs = Dispatcher::default().ladder();

    for pair in rungs.windows(2) {
        let (wider, narrower) = (pair[0].capabilities(), pair[1].capabilities());
        assert_eq!(wider.len(), narrower.len() + 1);
        assert_eq!(narrower.intersection(wider), narrower);
    }
}

#[test]
fn test_without_and_with_options() {
    let d = Dispatcher::default()
        .without(Capability::Fma)
        .without(Capability::Neon);
    assert!(!d.capabilities().contains(Capability::Fma));
    assert!(!d.can_fuse_operations());

    let strict = Dispatcher::default().with_options(MathOptions::strict());
    assert_eq!(strict.options(), MathOptions::strict());
    assert!(!strict.can_fuse_operations());
}

#[test]
fn test_configure_is_idempotent_for_same_options() {
    let first = Dispatcher::configure(MathOptions::default());
    assert!(first.is_ok());
    assert_eq!(Dispatcher::configure(MathOptions::default()), first);

    let conflicting = Dispatcher::configure(MathOptions::strict());
    assert!(matches!(conflicting, Err(LaneError::Configuration { .. })));
    assert_eq!(Dispatcher::global().options(), MathOptions::default());
}
