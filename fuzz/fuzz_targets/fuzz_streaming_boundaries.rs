// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target checking streaming-slice-boundary invariance
//! (`spec.md` §8 Testable Property 6): feeding arbitrary partitions of
//! the same input through the Streaming core always agrees with the
//! Scalar reference run over the concatenation.
//!
//! Run with: cargo +nightly fuzz run fuzz_streaming_boundaries

#![no_main]

use libfuzzer_sys::fuzz_target;
use zmin_core::scalar::minify_scalar;
use zmin_stream::StreamingMinifier;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000_000 || data.is_empty() {
        return;
    }

    let mut scalar_out = vec![0u8; data.len()];
    let Ok(scalar_len) = minify_scalar(data, &mut scalar_out) else {
        return;
    };
    let expected = &scalar_out[..scalar_len];

    // Derive a deterministic partition from the input itself: cut at
    // every position whose preceding byte's low 3 bits are zero, a cheap
    // way to get varied, data-dependent boundary placement without a
    // second PRNG input.
    let mut cuts = vec![0usize];
    for (i, &b) in data.iter().enumerate() {
        if b & 0b111 == 0 {
            cuts.push(i + 1);
        }
    }
    cuts.push(data.len());
    cuts.dedup();

    let mut out = Vec::new();
    let mut streamer = StreamingMinifier::new(&mut out);
    for w in cuts.windows(2) {
        streamer.feed(&data[w[0]..w[1]]).expect("vec sink never fails");
    }
    streamer.finish().expect("vec sink never fails");

    assert_eq!(out, expected, "streaming output diverged from scalar reference");
});
