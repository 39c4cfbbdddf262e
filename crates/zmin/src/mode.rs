// SPDX-License-Identifier: MIT OR Apache-2.0
//! The public `{Eco, Sport, Turbo}` profile selector (`spec.md` §6).

use zmin_core::capability::{CapabilityReport, SimdLevel};
use zmin_core::result::Strategy;

/// A caller-facing performance profile, translated internally to a
/// [`Strategy`] (or left to the dispatcher's full auto-selection) rather
/// than exposed as a raw strategy choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Single-threaded, bounded-memory. Always resolves to
    /// [`Strategy::Streaming`].
    Eco,
    /// Default balanced profile: Vectorized or Scalar by input size.
    /// Never escalates to Parallel or Streaming.
    Sport,
    /// Parallel when profitable, falling back to Vectorized or Scalar on
    /// a single-core host.
    Turbo,
}

/// Below this size even TURBO does not bother spinning up workers; it
/// matches the Adaptive Chunker's own small-input threshold
/// (`zmin_parallel::chunker`), since a chunk plan below this size always
/// collapses to one chunk anyway.
const TURBO_PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Size below which SPORT (and TURBO's non-parallel fallback) always use
/// the scalar core regardless of SIMD availability (`spec.md` §4.6 step 2).
const SCALAR_ONLY_THRESHOLD: usize = 64 * 1024;

impl Mode {
    /// Resolve this mode to a concrete [`Strategy`] given the machine's
    /// capabilities, the input length, and whether SIMD is enabled.
    #[must_use]
    pub fn resolve(self, capability: &CapabilityReport, input_len: usize, enable_simd: bool) -> Strategy {
        match self {
            Self::Eco => Strategy::Streaming,
            Self::Sport => Self::scalar_or_vectorized(capability, input_len, enable_simd),
            Self::Turbo => {
                if capability.core_count >= 2 && input_len >= TURBO_PARALLEL_THRESHOLD {
                    Strategy::Parallel
                } else {
                    Self::scalar_or_vectorized(capability, input_len, enable_simd)
                }
            }
        }
    }

    fn scalar_or_vectorized(capability: &CapabilityReport, input_len: usize, enable_simd: bool) -> Strategy {
        if input_len < SCALAR_ONLY_THRESHOLD {
            return Strategy::Scalar;
        }
        if enable_simd && capability.simd_level != SimdLevel::None {
            Strategy::Vectorized
        } else {
            Strategy::Scalar
        }
    }
}
