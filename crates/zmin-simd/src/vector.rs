// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-architecture block kernels.
//!
//! Each kernel answers one question with a single compare-and-movemask
//! pass: does this block contain any structural whitespace at all? If
//! not, the whole block is copied verbatim. If so, the block falls back
//! to a scalar compaction pass. Callers guarantee the required feature is
//! present (the level came from `CapabilityReport::detect`), so the
//! `unsafe` here is a documented precondition, not a guess.

use zmin_core::capability::SimdLevel;
use zmin_core::error::{Result, ZminError};

/// Strip structural whitespace from exactly one `level.block_width()`-sized
/// block known to contain no `"` byte, appending the result to `out`.
pub(crate) fn strip_block(
    level: SimdLevel,
    block: &[u8],
    out: &mut [u8],
    out_pos: &mut usize,
) -> Result<()> {
    match level {
        SimdLevel::Bit128 => {
            #[cfg(target_arch = "x86_64")]
            {
                // SAFETY: SSE2 is part of the x86_64 baseline ABI.
                return unsafe { crate::x86::strip_block_sse2(block, out, out_pos) };
            }
            #[cfg(target_arch = "aarch64")]
            {
                // SAFETY: Bit128 is only ever produced by
                // `SimdLevel::detect` after confirming NEON support.
                return unsafe { crate::arm::strip_block_neon(block, out, out_pos) };
            }
            #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
            {
                unreachable!("SimdLevel::Bit128 is never detected off x86_64/aarch64")
            }
        }
        SimdLevel::Bit256 | SimdLevel::Bit512 => {
            #[cfg(target_arch = "x86_64")]
            {
                // SAFETY: Bit256/Bit512 are only ever produced by
                // `SimdLevel::detect` after confirming AVX2 support; the
                // 512-bit tier is served by the 256-bit kernel (SPEC_FULL
                // §4.2) to avoid a second, harder-to-verify code path.
                return unsafe { crate::x86::strip_block_avx2(block, out, out_pos) };
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                unreachable!("SimdLevel::Bit256/Bit512 is never detected off x86_64")
            }
        }
        SimdLevel::None => unreachable!("strip_block is never called for SimdLevel::None"),
    }
}

/// Shared scalar compaction fallback used by every kernel once it has
/// determined (via its own vector compare) that a block contains at least
/// one whitespace byte. Pulled out so each architecture module stays
/// focused on the compare step.
pub(crate) fn compact_block_scalar(block: &[u8], out: &mut [u8], out_pos: &mut usize) -> Result<()> {
    for &b in block {
        if matches!(b, 0x20 | 0x09 | 0x0A | 0x0D) {
            continue;
        }
        let pos = *out_pos;
        if pos >= out.len() {
            return Err(ZminError::OutputBufferTooSmall {
                needed: pos + 1,
                available: out.len(),
            });
        }
        out[pos] = b;
        *out_pos = pos + 1;
    }
    Ok(())
}

/// Shared bulk-copy path used once a kernel has determined a block
/// contains no whitespace at all.
pub(crate) fn copy_block_whole(block: &[u8], out: &mut [u8], out_pos: &mut usize) -> Result<()> {
    let pos = *out_pos;
    let needed = pos + block.len();
    if needed > out.len() {
        return Err(ZminError::OutputBufferTooSmall {
            needed,
            available: out.len(),
        });
    }
    out[pos..needed].copy_from_slice(block);
    *out_pos = needed;
    Ok(())
}
