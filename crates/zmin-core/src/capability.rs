// SPDX-License-Identifier: MIT OR Apache-2.0
//! One-shot system capability detection.
//!
//! A [`CapabilityReport`] is produced once (typically by a dispatcher's
//! `init()`) and never changes afterwards; it is the only input the
//! Strategy Dispatcher and Adaptive Chunker need besides the caller's
//! [`crate::MinifyConfig`].

use std::fs;

/// Widest SIMD register width the process can use, as a tier rather than a
/// raw feature bit, per `spec.md` §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// No usable SIMD; the scalar core is the only option.
    None,
    /// 128-bit registers (SSE2 on x86_64, NEON on aarch64).
    Bit128,
    /// 256-bit registers (AVX2).
    Bit256,
    /// 512-bit registers (AVX-512F). Served by the 256-bit kernel in this
    /// implementation; see `SPEC_FULL.md` §4.2.
    Bit512,
}

impl SimdLevel {
    /// Vector block width in bytes for this tier, or `None` if the tier
    /// carries no vector hot path of its own (falls through to scalar).
    #[must_use]
    pub const fn block_width(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Bit128 => Some(16),
            // The 512-bit tier is served by the 256-bit kernel (see
            // `SPEC_FULL.md` §4.2); both report a 32-byte block width.
            Self::Bit256 | Self::Bit512 => Some(32),
        }
    }

    fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::is_x86_feature_detected!("avx512f") {
                return Self::Bit512;
            }
            if std::is_x86_feature_detected!("avx2") {
                return Self::Bit256;
            }
            if std::is_x86_feature_detected!("sse2") {
                return Self::Bit128;
            }
            return Self::None;
        }
        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return Self::Bit128;
            }
            return Self::None;
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::None
        }
    }
}

/// Fixed snapshot of the machine a dispatcher is running on.
///
/// Immutable after construction (`spec.md` §3 invariant). Every field falls
/// back to a conservative value rather than failing the detector's single
/// probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    /// Logical core count (falls back to `1` on probe failure).
    pub core_count: usize,
    /// Best available SIMD width.
    pub simd_level: SimdLevel,
    /// Available memory in bytes (falls back to a conservative default).
    pub memory_bytes: u64,
    /// NUMA node count (`>= 1`).
    pub numa_nodes: usize,
}

/// Conservative memory estimate used when the OS probe fails.
const FALLBACK_MEMORY_BYTES: u64 = 512 * 1024 * 1024;

impl CapabilityReport {
    /// Run the one-shot probe now.
    #[must_use]
    pub fn detect() -> Self {
        Detector.probe()
    }
}

/// Zero-sized probe handle; exists so a dispatcher can hold an explicit
/// `Detector` value (Design Note §9: avoid ambient singletons) even though
/// the probe itself needs no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detector;

impl Detector {
    /// Create a detector. Construction never fails; the probe itself is
    /// infallible and degrades to conservative defaults instead.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run the capability probe.
    #[must_use]
    pub fn probe(self) -> CapabilityReport {
        CapabilityReport {
            core_count: Self::detect_core_count(),
            simd_level: SimdLevel::detect(),
            memory_bytes: Self::detect_memory_bytes(),
            numa_nodes: Self::detect_numa_nodes(),
        }
    }

    fn detect_core_count() -> usize {
        let sys = sysinfo::System::new_all();
        let n = sys.cpus().len();
        if n == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            n
        }
    }

    fn detect_memory_bytes() -> u64 {
        let sys = sysinfo::System::new_all();
        let available = sys.available_memory();
        if available == 0 {
            FALLBACK_MEMORY_BYTES
        } else {
            available
        }
    }

    #[cfg(target_os = "linux")]
    fn detect_numa_nodes() -> usize {
        match fs::read_dir("/sys/devices/system/node") {
            Ok(entries) => {
                let count = entries
                    .filter_map(std::result::Result::ok)
                    .filter(|e| {
                        e.file_name()
                            .to_str()
                            .is_some_and(|name| name.starts_with("node") && name[4..].parse::<u32>().is_ok())
                    })
                    .count();
                count.max(1)
            }
            Err(_) => 1,
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn detect_numa_nodes() -> usize {
        1
    }
}
