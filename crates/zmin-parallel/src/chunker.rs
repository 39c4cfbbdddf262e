// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adaptive Chunker: partitions the input for the parallel executor.
//!
//! Implements Strategy A (boundary probe) of the two strategies named in
//! `SPEC_FULL.md` §4.4: a single-threaded pre-scan records every offset
//! confirmed to lie outside a string, and nominal chunk boundaries are
//! snapped to the nearest such offset. Workers can then always start a
//! chunk in the scalar core's idle state, so there is no boundary-repair
//! pass at join time (Strategy B, not used here).

use zmin_core::capability::CapabilityReport;

/// Below this input size the chunker always returns a single chunk, which
/// forces the dispatcher onto the scalar/vectorized path instead.
const SMALL_INPUT_THRESHOLD: usize = 64 * 1024;

/// Target per-chunk working set: large enough to amortize per-chunk
/// overhead, small enough to stay L2-resident on typical hardware.
const TARGET_CHUNK_BYTES: usize = 256 * 1024;

/// Chunk size, chunk count, and effective worker count for one parallel
/// minify call (`spec.md` §3, `ChunkPlan`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Nominal size of each chunk in bytes (the last chunk may be shorter).
    pub chunk_size: usize,
    /// Number of chunks the input is split into.
    pub chunk_count: usize,
    /// Worker count actually used, `= min(requested, chunk_count)`.
    pub worker_count: usize,
}

impl ChunkPlan {
    /// A plan that forces single-chunk (effectively scalar) execution.
    #[must_use]
    const fn single_chunk(input_len: usize) -> Self {
        Self {
            chunk_size: input_len.max(1),
            chunk_count: 1,
            worker_count: 1,
        }
    }
}

/// Produces a [`ChunkPlan`] and the boundary offsets that back it.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveChunker {
    requested_workers: usize,
    chunk_size_override: Option<usize>,
}

impl AdaptiveChunker {
    /// Build a chunker targeting `requested_workers` threads, optionally
    /// pinned to a caller-supplied chunk size (`spec.md` §3 `MinifyConfig`).
    #[must_use]
    pub const fn new(requested_workers: usize, chunk_size_override: Option<usize>) -> Self {
        Self {
            requested_workers,
            chunk_size_override,
        }
    }

    /// Compute the chunk plan for an input of length `input_len`, bounded
    /// by the capability report's available memory (`spec.md` §4.4 policy
    /// (b): `C * T <= available memory / 2`).
    #[must_use]
    pub fn plan(&self, input_len: usize, capability: &CapabilityReport) -> ChunkPlan {
        if self.requested_workers <= 1 || input_len < SMALL_INPUT_THRESHOLD {
            return ChunkPlan::single_chunk(input_len);
        }

        let chunk_size = self.chunk_size_override.unwrap_or_else(|| {
            let memory_bound = usize::try_from(capability.memory_bytes / 2)
                .unwrap_or(usize::MAX)
                .checked_div(self.requested_workers)
                .unwrap_or(TARGET_CHUNK_BYTES);
            TARGET_CHUNK_BYTES.min(memory_bound).max(1)
        });

        let chunk_count = input_len.div_ceil(chunk_size).max(1);
        if chunk_count <= 1 {
            return ChunkPlan::single_chunk(input_len);
        }

        ChunkPlan {
            chunk_size,
            chunk_count,
            worker_count: self.requested_workers.min(chunk_count),
        }
    }

    /// Compute the confirmed chunk boundary offsets for `input` under
    /// `plan`, snapping each nominal boundary to the nearest offset the
    /// probe confirms lies outside any string.
    ///
    /// Returns `chunk_count + 1` offsets: `boundaries[0] == 0`, the last
    /// equals `input.len()`, and `boundaries` is strictly increasing.
    #[must_use]
    pub fn boundaries(input: &[u8], plan: &ChunkPlan) -> Vec<usize> {
        if plan.chunk_count <= 1 {
            return vec![0, input.len()];
        }

        let safe_offsets = probe_safe_offsets(input);
        let mut boundaries = Vec::with_capacity(plan.chunk_count + 1);
        boundaries.push(0);

        for i in 1..plan.chunk_count {
            let nominal = i * plan.chunk_size;
            if nominal >= input.len() {
                break;
            }
            let snapped = snap_to_safe_offset(&safe_offsets, nominal, input.len());
            if boundaries.last().copied() != Some(snapped) {
                boundaries.push(snapped);
            }
        }

        boundaries.push(input.len());
        boundaries
    }
}

/// Single-threaded pre-scan: records every offset that is confirmed to lie
/// outside a string literal, by replaying the `(in_string, escaped)` state
/// machine and noting the position after each byte that leaves the idle
/// state. Offset 0 is always safe (input starts idle).
fn probe_safe_offsets(input: &[u8]) -> Vec<usize> {
    let mut offsets = vec![0];
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in input.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if in_string {
            match b {
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        }
        if !in_string && !escaped {
            offsets.push(i + 1);
        }
    }

    offsets
}

/// Find the safe offset closest to `nominal`, preferring the largest safe
/// offset `<= nominal` and falling back to the smallest one `> nominal`
/// if none qualifies (so boundaries only ever move, never vanish).
fn snap_to_safe_offset(safe_offsets: &[usize], nominal: usize, input_len: usize) -> usize {
    match safe_offsets.binary_search(&nominal) {
        Ok(idx) => safe_offsets[idx],
        Err(idx) => {
            if idx == 0 {
                safe_offsets.first().copied().unwrap_or(input_len)
            } else if idx >= safe_offsets.len() {
                safe_offsets.last().copied().unwrap_or(input_len)
            } else {
                // Prefer snapping backward to keep chunks from growing
                // without bound when strings are long.
                safe_offsets[idx - 1]
            }
        }
    }
}
