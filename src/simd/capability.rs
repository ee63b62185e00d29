//! Runtime detection of the SIMD instruction sets kernels may use.
//!
//! The hardware is probed once per process and the result cached in a
//! `OnceLock`. After that the set never changes, and every kernel reads it
//! through a [`Dispatcher`](crate::simd::Dispatcher) instead of probing again.
//! Capabilities the probe cannot confirm (foreign architecture, unknown
//! hardware) read as unsupported and fall through to software kernels.

use std::fmt;
use std::sync::OnceLock;

/// An instruction-set extension gating a native kernel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Sse,
    Sse2,
    Sse3,
    Ssse3,
    Sse41,
    Avx,
    Avx2,
    /// Fused multiply-add. On x86 only reported together with [`Capability::Avx`].
    Fma,
    Neon,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::Sse,
        Capability::Sse2,
        Capability::Sse3,
        Capability::Ssse3,
        Capability::Sse41,
        Capability::Avx,
        Capability::Avx2,
        Capability::Fma,
        Capability::Neon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Capability::Sse => "sse",
            Capability::Sse2 => "sse2",
            Capability::Sse3 => "sse3",
            Capability::Ssse3 => "ssse3",
            Capability::Sse41 => "sse4.1",
            Capability::Avx => "avx",
            Capability::Avx2 => "avx2",
            Capability::Fma => "fma",
            Capability::Neon => "neon",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable set of capabilities.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet {
    bits: u16,
}

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.bits & capability.bit() != 0
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self {
            bits: self.bits | capability.bit(),
        }
    }

    pub const fn without(self, capability: Capability) -> Self {
        Self {
            bits: self.bits & !capability.bit(),
        }
    }

    pub const fn intersection(self, other: CapabilitySet) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    pub const fn union(self, other: CapabilitySet) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }

    /// Probes the running hardware. Uncached; use [`detected`] instead.
    pub fn probe() -> Self {
        probe_hardware()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CapabilitySet::empty(), CapabilitySet::with)
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(x86_simd)]
fn probe_hardware() -> CapabilitySet {
    let mut set = CapabilitySet::empty();

    if is_x86_feature_detected!("sse") {
        set = set.with(Capability::Sse);
    }
    if is_x86_feature_detected!("sse2") {
        set = set.with(Capability::Sse2);
    }
    if is_x86_feature_detected!("sse3") {
        set = set.with(Capability::Sse3);
    }
    if is_x86_feature_detected!("ssse3") {
        set = set.with(Capability::Ssse3);
    }
    if is_x86_feature_detected!("sse4.1") {
        set = set.with(Capability::Sse41);
    }
    if is_x86_feature_detected!("avx") {
        set = set.with(Capability::Avx);
    }
    if is_x86_feature_detected!("avx2") {
        set = set.with(Capability::Avx2);
    }
    // The 64-bit lane fused kernels are 256 bits wide.
    if is_x86_feature_detected!("fma") && set.contains(Capability::Avx) {
        set = set.with(Capability::Fma);
    }

    set
}

#[cfg(arm_simd)]
fn probe_hardware() -> CapabilitySet {
    if std::arch::is_aarch64_feature_detected!("neon") {
        CapabilitySet::empty().with(Capability::Neon)
    } else {
        CapabilitySet::empty()
    }
}

#[cfg(fallback)]
fn probe_hardware() -> CapabilitySet {
    CapabilitySet::empty()
}

static DETECTED: OnceLock<CapabilitySet> = OnceLock::new();

/// Capabilities of the running hardware, probed on first call.
#[inline]
pub fn detected() -> CapabilitySet {
    *DETECTED.get_or_init(|| {
        let capabilities = probe_hardware();
        tracing::debug!(?capabilities, "probed SIMD capabilities");
        capabilities
    })
}

/// Whether `capability` is usable on the running hardware.
#[inline]
pub fn is_supported(capability: Capability) -> bool {
    detected().contains(capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_operations() {
        let set = CapabilitySet::empty()
            .with(Capability::Sse)
            .with(Capability::Sse3);

        assert!(set.contains(Capability::Sse));
        assert!(!set.contains(Capability::Avx));
        assert_eq!(set.len(), 2);
        assert!(set.without(Capability::Sse).contains(Capability::Sse3));
        assert!(set.without(Capability::Sse).without(Capability::Sse3).is_empty());

        let other: CapabilitySet = [Capability::Sse3, Capability::Neon].into_iter().collect();
        assert_eq!(
            set.intersection(other).iter().collect::<Vec<_>>(),
            vec![Capability::Sse3]
        );
        assert_eq!(set.union(other).len(), 3);
    }

    #[test]
    fn detection_is_cached_and_stable() {
        let first = detected();
        let second = detected();
        assert_eq!(first, second);
        assert_eq!(first, CapabilitySet::probe());

        for capability in Capability::ALL {
            assert_eq!(is_supported(capability), first.contains(capability));
        }
    }

    #[test]
    fn fma_implies_avx_on_x86() {
        let set = detected();
        if set.contains(Capability::Fma) && !set.contains(Capability::Neon) {
            assert!(set.contains(Capability::Avx));
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_baseline_is_reported() {
        assert!(is_supported(Capability::Sse));
        assert!(is_supported(Capability::Sse2));
    }

    #[test]
    fn debug_lists_members() {
        let set = CapabilitySet::empty().with(Capability::Avx).with(Capability::Fma);
        assert_eq!(format!("{:?}", set), "{Avx, Fma}");
        assert_eq!(Capability::Sse41.to_string(), "sse4.1");
    }
}
