// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target checking the Scalar core's baseline contract on
//! arbitrary, possibly-malformed input: it either succeeds with an
//! output no longer than the input, or reports `OutputBufferTooSmall`
//! — it never panics and never reports success with more output bytes
//! than input bytes (`spec.md` §6 output guarantee; §1 malformed-input
//! tolerance).
//!
//! Run with: cargo +nightly fuzz run fuzz_scalar_never_panics

#![no_main]

use libfuzzer_sys::fuzz_target;
use zmin_core::scalar::minify_scalar;

fuzz_target!(|data: &[u8]| {
    let mut out = vec![0u8; data.len()];
    if let Ok(n) = minify_scalar(data, &mut out) {
        assert!(n <= data.len());
    }
});
