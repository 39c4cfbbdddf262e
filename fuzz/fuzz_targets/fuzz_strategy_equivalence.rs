// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target checking that the Vectorized and Parallel cores
//! produce byte-identical output to the Scalar reference on arbitrary
//! byte input (`spec.md` §8 Testable Property 1).
//!
//! Run with: cargo +nightly fuzz run fuzz_strategy_equivalence

#![no_main]

use libfuzzer_sys::fuzz_target;
use zmin_core::capability::{CapabilityReport, SimdLevel};
use zmin_core::scalar::minify_scalar;
use zmin_parallel::chunker::AdaptiveChunker;
use zmin_simd::minify_vectorized;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000_000 {
        return;
    }

    let mut scalar_out = vec![0u8; data.len()];
    let Ok(scalar_len) = minify_scalar(data, &mut scalar_out) else {
        return;
    };
    let expected = &scalar_out[..scalar_len];

    for level in [SimdLevel::None, SimdLevel::Bit128, SimdLevel::Bit256] {
        let mut out = vec![0u8; data.len()];
        let n = minify_vectorized(data, &mut out, level).expect("vectorized must not fail where scalar succeeded");
        assert_eq!(&out[..n], expected, "vectorized mismatch at level {level:?}");
    }

    let capability = CapabilityReport {
        core_count: 4,
        simd_level: SimdLevel::None,
        memory_bytes: 1 << 30,
        numa_nodes: 1,
    };
    for workers in [1usize, 2, 4, 8] {
        let chunker = AdaptiveChunker::new(workers, Some(64));
        let plan = chunker.plan(data.len(), &capability);
        let boundaries = AdaptiveChunker::boundaries(data, &plan);
        let mut out = vec![0u8; data.len()];
        let n = zmin_parallel::minify_parallel(data, &mut out, &boundaries, plan.worker_count, SimdLevel::None)
            .expect("parallel must not fail where scalar succeeded");
        assert_eq!(&out[..n], expected, "parallel mismatch at {workers} workers");
    }
});
