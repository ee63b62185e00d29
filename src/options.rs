//! Precision policy shared by every kernel of a [`Dispatcher`](crate::simd::Dispatcher).

/// Options controlling how kernels trade precision for speed.
///
/// The value is immutable once handed to a dispatcher. The process-wide
/// dispatcher takes its options exactly once, see
/// [`Dispatcher::configure`](crate::simd::Dispatcher::configure).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MathOptions {
    allow_imprecise_math: bool,
}

impl MathOptions {
    /// Options with imprecise math allowed: the `fast_*` family uses native
    /// fused instructions whenever the hardware has them.
    pub const fn new() -> Self {
        Self {
            allow_imprecise_math: true,
        }
    }

    /// Options that pin the `fast_*` family to separate multiply and add.
    pub const fn strict() -> Self {
        Self {
            allow_imprecise_math: false,
        }
    }

    /// Returns a copy with the imprecise math policy set to `allow`.
    pub const fn with_imprecise_math(self, allow: bool) -> Self {
        Self {
            allow_imprecise_math: allow,
        }
    }

    pub const fn allow_imprecise_math(&self) -> bool {
        self.allow_imprecise_math
    }
}

impl Default for MathOptions {
    fn default() -> Self {
        Self::new()
    }
}
