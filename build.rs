use std::env;

// Architecture families that ship native kernels in this crate
#[derive(PartialEq, Eq, Debug)]
struct ArchFamily {
    target_arches: &'static [&'static str],
    cfg_flag: &'static str,
}

impl ArchFamily {
    fn families() -> Vec<ArchFamily> {
        vec![
            ArchFamily {
                target_arches: &["x86", "x86_64"],
                cfg_flag: "x86_simd",
            },
            ArchFamily {
                target_arches: &["aarch64"],
                cfg_flag: "arm_simd",
            },
        ]
    }

    fn matches(&self, target_arch: &str) -> bool {
        self.target_arches.contains(&target_arch)
    }
}

fn main() {
    println!("cargo::rerun-if-changed=build.rs");

    // Disable flag warnings for build
    println!("cargo::rustc-check-cfg=cfg(x86_simd)");
    println!("cargo::rustc-check-cfg=cfg(arm_simd)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");

    // CARGO_CFG_TARGET_ARCH describes the target, not the host, so this
    // stays correct when cross-compiling.
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Runtime detection picks the instruction tier; the family only decides
    // which kernel modules get compiled in.
    let cfg_flag = ArchFamily::families()
        .into_iter()
        .find(|family| family.matches(&target_arch))
        .map(|family| family.cfg_flag)
        .unwrap_or("fallback");

    println!("cargo::rustc-cfg={cfg_flag}");
}
