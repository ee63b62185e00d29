//! Strategy selection for every dispatched kernel.
//!
//! Each [`Operation`] owns an ordered candidate list per element kind: most
//! specialized instruction set first, the software kernel implied last. A
//! [`Dispatcher`] walks that list against its capability set and runs the
//! first native kernel it is allowed to, or the scalar kernel otherwise.
//!
//! A dispatcher only ever holds a subset of the detected hardware
//! capabilities, which is what makes calling the `#[target_feature]` kernels
//! sound. Restricting it further (see [`Dispatcher::ladder`]) is how tests
//! prove every tier computes the same results.

use std::sync::OnceLock;

use crate::error::{configuration_error, not_implemented, platform_not_supported, Result};
use crate::options::MathOptions;
use crate::simd::capability::{self, Capability, CapabilitySet};
use crate::simd::traits::ElementKind;

/// A group of kernels sharing one candidate list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// add, subtract, multiply, divide
    Arithmetic,
    SquareRoot,
    MinMax,
    HorizontalAdd,
    /// round, floor, truncate
    Rounding,
    /// and, or, xor, and_not, not
    Bitwise,
    Comparison,
    /// 2D, 3D and 4D dot products
    Dot,
    Cross2D,
    Cross3D,
    Cross4D,
    /// multiply-add, multiply-subtract and the alternating variants
    Fused,
    /// negated multiply-add and multiply-subtract, which have no software emulation
    FusedNegated,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::Arithmetic,
        Operation::SquareRoot,
        Operation::MinMax,
        Operation::HorizontalAdd,
        Operation::Rounding,
        Operation::Bitwise,
        Operation::Comparison,
        Operation::Dot,
        Operation::Cross2D,
        Operation::Cross3D,
        Operation::Cross4D,
        Operation::Fused,
        Operation::FusedNegated,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Arithmetic => "arithmetic",
            Operation::SquareRoot => "sqrt",
            Operation::MinMax => "min/max",
            Operation::HorizontalAdd => "horizontal_add",
            Operation::Rounding => "rounding",
            Operation::Bitwise => "bitwise",
            Operation::Comparison => "comparison",
            Operation::Dot => "dot",
            Operation::Cross2D => "cross2d",
            Operation::Cross3D => "cross3d",
            Operation::Cross4D => "cross4d",
            Operation::Fused => "fused",
            Operation::FusedNegated => "fused_negated",
        }
    }

    /// Native strategies for this operation, best first.
    ///
    /// Candidates of a foreign architecture are never detected, so one list
    /// serves every target.
    pub const fn candidates(self, kind: ElementKind) -> &'static [Capability] {
        use Capability::*;

        match kind {
            ElementKind::F32 => match self {
                Operation::Arithmetic
                | Operation::SquareRoot
                | Operation::MinMax
                | Operation::Bitwise
                | Operation::Comparison => &[Sse, Neon],
                Operation::HorizontalAdd => &[Sse3, Neon],
                Operation::Rounding => &[Sse41, Neon],
                Operation::Dot => &[Sse41, Sse3, Sse, Neon],
                Operation::Cross2D | Operation::Cross3D => &[Sse],
                Operation::Cross4D => &[],
                Operation::Fused | Operation::FusedNegated => &[Fma, Neon],
            },
            ElementKind::F64 => match self {
                Operation::Arithmetic
                | Operation::SquareRoot
                | Operation::MinMax
                | Operation::Bitwise
                | Operation::Comparison => &[Avx, Sse2, Neon],
                Operation::HorizontalAdd => &[Sse3, Neon],
                Operation::Rounding => &[Avx, Sse41, Neon],
                Operation::Dot => &[Avx, Sse2, Neon],
                Operation::Cross2D => &[Sse2],
                Operation::Cross3D => &[Avx2],
                Operation::Cross4D => &[],
                Operation::Fused | Operation::FusedNegated => &[Fma, Neon],
            },
        }
    }
}

/// The strategy a dispatcher picks for an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Path {
    Native(Capability),
    Software,
}

impl Path {
    pub const fn is_native(self) -> bool {
        matches!(self, Path::Native(_))
    }
}

/// Order in which [`Dispatcher::ladder`] strips capabilities.
const LADDER: [Capability; 9] = [
    Capability::Avx2,
    Capability::Fma,
    Capability::Avx,
    Capability::Sse41,
    Capability::Ssse3,
    Capability::Sse3,
    Capability::Sse2,
    Capability::Sse,
    Capability::Neon,
];

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

/// Capability set plus precision policy: everything a kernel needs to
/// choose its strategy.
///
/// Kernels are methods of the traits in [`crate::ops`], implemented for
/// `Dispatcher` once per register type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatcher {
    capabilities: CapabilitySet,
    options: MathOptions,
}

impl Dispatcher {
    /// Dispatcher using every detected hardware capability.
    pub fn new(options: MathOptions) -> Self {
        Self {
            capabilities: capability::detected(),
            options,
        }
    }

    /// Dispatcher that always runs the software kernels.
    pub const fn scalar(options: MathOptions) -> Self {
        Self {
            capabilities: CapabilitySet::empty(),
            options,
        }
    }

    /// Keeps only the capabilities also present in `allowed`.
    pub const fn restricted(self, allowed: CapabilitySet) -> Self {
        Self {
            capabilities: self.capabilities.intersection(allowed),
            options: self.options,
        }
    }

    pub const fn without(self, capability: Capability) -> Self {
        Self {
            capabilities: self.capabilities.without(capability),
            options: self.options,
        }
    }

    pub const fn with_options(self, options: MathOptions) -> Self {
        Self {
            capabilities: self.capabilities,
            options,
        }
    }

    /// The process-wide dispatcher.
    ///
    /// Built on first use from the detected hardware and either the options
    /// passed to [`Dispatcher::configure`] or [`MathOptions::default`].
    #[inline]
    pub fn global() -> &'static Dispatcher {
        GLOBAL.get_or_init(|| Dispatcher::new(MathOptions::default()))
    }

    /// Installs `options` for the process-wide dispatcher.
    ///
    /// Must run before the first kernel call through [`Dispatcher::global`].
    /// Repeating the call with the same options is a no-op; different
    /// options fail with [`LaneError::Configuration`](crate::error::LaneError::Configuration).
    pub fn configure(options: MathOptions) -> Result<&'static Dispatcher> {
        let mut installed = false;
        let global = GLOBAL.get_or_init(|| {
            installed = true;
            Dispatcher::new(options)
        });

        if global.options != options {
            return Err(configuration_error(format!(
                "dispatcher already initialized with {:?}, cannot switch to {:?}",
                global.options, options
            )));
        }

        if installed {
            tracing::info!(
                capabilities = ?global.capabilities,
                ?options,
                "configured process-wide dispatcher"
            );
        }

        Ok(global)
    }

    pub const fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    pub const fn options(&self) -> MathOptions {
        self.options
    }

    /// First candidate this dispatcher may run.
    #[inline(always)]
    pub fn first_supported(&self, candidates: &[Capability]) -> Option<Capability> {
        candidates
            .iter()
            .copied()
            .find(|capability| self.capabilities.contains(*capability))
    }

    /// Strategy chosen for `operation` on `kind` lanes.
    pub fn path(&self, operation: Operation, kind: ElementKind) -> Path {
        match self.first_supported(operation.candidates(kind)) {
            Some(capability) => Path::Native(capability),
            None => Path::Software,
        }
    }

    /// The native strategy for `operation`, or why there is none.
    ///
    /// Fails with `NotImplemented` when no native kernel exists for `kind`
    /// on any tier, and with `PlatformNotSupported` when one exists but this
    /// dispatcher cannot run it.
    pub fn require_native(&self, operation: Operation, kind: ElementKind) -> Result<Capability> {
        let candidates = operation.candidates(kind);
        if candidates.is_empty() {
            return Err(not_implemented(operation.name()));
        }

        self.first_supported(candidates).ok_or_else(|| {
            let names: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
            platform_not_supported(format!(
                "{} on {} lanes requires one of [{}]",
                operation.name(),
                kind.name(),
                names.join(", ")
            ))
        })
    }

    /// Whether the `fast_*` family may use native fused instructions.
    #[inline]
    pub fn can_fuse_operations(&self) -> bool {
        self.options.allow_imprecise_math()
            && self
                .first_supported(Operation::Fused.candidates(ElementKind::F32))
                .is_some()
    }

    /// This dispatcher followed by copies with capabilities removed one
    /// tier at a time, ending with the pure software dispatcher.
    pub fn ladder(&self) -> Vec<Dispatcher> {
        let mut rungs = vec![*self];
        let mut current = *self;

        for capability in LADDER {
            if current.capabilities.contains(capability) {
                current = current.without(capability);
                rungs.push(current);
            }
        }

        rungs
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(MathOptions::default())
    }
}

/// Runs the first native arm the dispatcher allows, else the fallback.
///
/// ```ignore
/// dispatch!(self, Operation::Arithmetic, ElementKind::F32;
///     #[cfg(x86_simd)] Sse => sse::f32x4::add(left, right),
///     #[cfg(arm_simd)] Neon => neon::f32x4::add(left, right),
///     _ => scalar::add(left, right),
/// )
/// ```
macro_rules! dispatch {
    ($dispatcher:expr, $operation:expr, $kind:expr;
     $( #[$arch:meta] $capability:ident => $native:expr, )*
     _ => $fallback:expr $(,)?) => {
        match $dispatcher.first_supported($operation.candidates($kind)) {
            $(
                #[$arch]
                Some($crate::simd::capability::Capability::$capability) => {
                    // SAFETY: dispatchers only hold capabilities detected on this CPU.
                    unsafe { $native }
                }
            )*
            _ => $fallback,
        }
    };
}

pub(crate) use dispatch;
