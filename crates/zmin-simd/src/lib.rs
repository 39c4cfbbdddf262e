// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vectorized block acceleration for the zmin minifier.
//!
//! Implements the contract of `zmin_core::minify_scalar` exactly, but
//! processes non-string runs in fixed-width blocks when the machine's
//! detected SIMD tier supports it. See [`minify_vectorized`].

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::missing_safety_doc)]

mod vector;

#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(target_arch = "aarch64")]
mod arm;

use zmin_core::capability::SimdLevel;
use zmin_core::error::{Result, ZminError};
use zmin_core::scalar::MinifierState;

/// Run the vectorized minifier over `input`, writing into `output`.
///
/// Behaviorally identical to [`zmin_core::minify_scalar`] for every input;
/// only the branching schedule differs. `level` selects the block width:
/// `SimdLevel::None` falls straight through to the scalar core.
///
/// # Errors
///
/// Returns [`ZminError::OutputBufferTooSmall`] under the same condition as
/// the scalar core.
pub fn minify_vectorized(input: &[u8], output: &mut [u8], level: SimdLevel) -> Result<usize> {
    let Some(width) = level.block_width() else {
        return zmin_core::scalar::minify_scalar(input, output);
    };

    let mut state = MinifierState::new();
    let mut in_pos = 0usize;
    let mut out_pos = 0usize;

    loop {
        if state.is_idle() {
            if input.len() - in_pos < width {
                // Tail shorter than one block: finish scalar-wise.
                for &b in &input[in_pos..] {
                    state.step(b, output, &mut out_pos)?;
                }
                break;
            }

            let block = &input[in_pos..in_pos + width];
            if memchr::memchr(b'"', block).is_none() {
                // Vector hot path: no string entry in this block, so every
                // byte is either structural whitespace (dropped) or passes
                // through unchanged.
                vector::strip_block(level, block, output, &mut out_pos)?;
            } else {
                // Falls back to byte-by-byte §4.1 semantics for this block
                // only; the outer loop re-checks the vector path afterward.
                for &b in block {
                    state.step(b, output, &mut out_pos)?;
                }
            }
            in_pos += width;
            continue;
        }

        // In a string (or mid-escape): only a byte-by-byte scan can find
        // the matching unescaped closing quote, so there is no vector hot
        // path here by construction.
        while in_pos < input.len() && !state.is_idle() {
            state.step(input[in_pos], output, &mut out_pos)?;
            in_pos += 1;
        }
        if in_pos >= input.len() {
            break;
        }
    }

    Ok(out_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zmin_core::scalar::minify_scalar;

    fn check_matches_scalar(input: &[u8], level: SimdLevel) {
        let mut scalar_out = vec![0u8; input.len()];
        let scalar_len = minify_scalar(input, &mut scalar_out).unwrap();

        let mut vec_out = vec![0u8; input.len()];
        let vec_len = minify_vectorized(input, &mut vec_out, level).unwrap();

        assert_eq!(scalar_len, vec_len, "length mismatch for {level:?}");
        assert_eq!(
            &scalar_out[..scalar_len],
            &vec_out[..vec_len],
            "byte mismatch for {level:?}"
        );
    }

    /// Every `SimdLevel` this host can actually execute. `SimdLevel::None`
    /// is always exercisable; the wider tiers only if the CPU actually
    /// supports them, since their kernels assume the feature is present.
    fn all_levels() -> Vec<SimdLevel> {
        let mut levels = vec![SimdLevel::None];

        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("sse2") {
                levels.push(SimdLevel::Bit128);
            }
            if is_x86_feature_detected!("avx2") {
                levels.push(SimdLevel::Bit256);
                levels.push(SimdLevel::Bit512);
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                levels.push(SimdLevel::Bit128);
            }
        }

        levels
    }

    #[test]
    fn matches_scalar_on_simple_object() {
        let input = br#"{  "name"  :  "John Doe"  ,  "age"  :  30  }"#;
        for level in all_levels() {
            check_matches_scalar(input, level);
        }
    }

    #[test]
    fn matches_scalar_on_string_spanning_many_blocks() {
        let long_string = "x".repeat(200);
        let input = format!(r#"{{"k": "{long_string}", "n": 1}}"#);
        for level in all_levels() {
            check_matches_scalar(input.as_bytes(), level);
        }
    }

    #[test]
    fn matches_scalar_on_escaped_quotes_near_block_boundary() {
        // Craft a string whose escaped quote lands near a 16/32-byte
        // boundary to exercise the in-string byte-by-byte path.
        let input = format!(r#"{{"k": "{}\"x", "n": 2}}"#, "a".repeat(29));
        for level in all_levels() {
            check_matches_scalar(input.as_bytes(), level);
        }
    }

    #[test]
    fn matches_scalar_on_pure_whitespace_blocks() {
        let input = format!("{}{{{}}}{}", " ".repeat(40), "\n".repeat(10), "\t".repeat(5));
        for level in all_levels() {
            check_matches_scalar(input.as_bytes(), level);
        }
    }

    #[test]
    fn matches_scalar_on_no_whitespace_dense_block() {
        let input = "[".to_string() + &"1,".repeat(50) + "1]";
        for level in all_levels() {
            check_matches_scalar(input.as_bytes(), level);
        }
    }

    #[test]
    fn output_buffer_too_small_surfaces_for_every_level() {
        let input = br#"{"a": 1, "b": 2, "c": 3}"#;
        for level in all_levels() {
            let mut out = vec![0u8; 2];
            let err = minify_vectorized(input, &mut out, level).unwrap_err();
            assert!(matches!(err, ZminError::OutputBufferTooSmall { .. }));
        }
    }
}
