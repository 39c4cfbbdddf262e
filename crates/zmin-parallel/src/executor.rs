// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parallel Executor: work-stealing dispatch over a [`WorkDispenser`].
//!
//! A scatter-gather scheme (`SPEC_FULL.md` §4.7): each worker claims a
//! chunk index, takes exclusive ownership of that chunk's [`ChunkJob`],
//! minifies it into the job's own output buffer, and hands the finished
//! job back; the executor concatenates results in chunk-index order once
//! every worker has joined. Cancellation is cooperative only: the
//! dispenser's error flag stops future chunk pickups, but an in-flight
//! chunk always finishes naturally (`spec.md` §4.5).

use parking_lot::Mutex;
use zmin_core::capability::SimdLevel;
use zmin_core::error::{Result, ZminError};

use crate::dispenser::WorkDispenser;
use crate::job::ChunkJob;

/// Run the parallel minifier: split `input` at `boundaries`, process each
/// resulting chunk with the vectorized core (or the scalar core if
/// `simd_level` is [`SimdLevel::None`]) across `worker_count` threads, and
/// write the concatenated result into `output`.
///
/// `boundaries` must start at `0`, end at `input.len()`, and be strictly
/// increasing (the contract produced by
/// [`crate::chunker::AdaptiveChunker::boundaries`]).
///
/// # Errors
///
/// Returns [`ZminError::ProcessingError`] if any worker's chunk fails (the
/// first observed error is preserved), or
/// [`ZminError::OutputBufferTooSmall`] if the concatenated result does not
/// fit in `output`.
pub fn execute(
    input: &[u8],
    output: &mut [u8],
    boundaries: &[usize],
    worker_count: usize,
    simd_level: SimdLevel,
) -> Result<usize> {
    let chunk_count = boundaries.len().saturating_sub(1);
    if chunk_count == 0 {
        return Ok(0);
    }

    let jobs: Vec<Mutex<Option<ChunkJob<'_>>>> = boundaries
        .windows(2)
        .enumerate()
        .map(|(index, w)| Mutex::new(Some(ChunkJob::new(index, &input[w[0]..w[1]]))))
        .collect();

    let dispenser = WorkDispenser::new(chunk_count);
    let finished: Mutex<Vec<ChunkJob<'_>>> = Mutex::new(Vec::with_capacity(chunk_count));
    let first_error: Mutex<Option<ZminError>> = Mutex::new(None);

    let effective_workers = worker_count.clamp(1, chunk_count);

    std::thread::scope(|scope| {
        for _ in 0..effective_workers {
            scope.spawn(|| {
                while let Some(index) = dispenser.next() {
                    let mut job = jobs[index]
                        .lock()
                        .take()
                        .expect("each chunk index is claimed at most once");

                    match zmin_simd::minify_vectorized(job.input, &mut job.output, simd_level) {
                        Ok(written) => {
                            job.written = written;
                            finished.lock().push(job);
                        }
                        Err(err) => {
                            let mut guard = first_error.lock();
                            if guard.is_none() {
                                *guard = Some(err);
                            }
                            dispenser.report_error();
                            break;
                        }
                    }
                }
            });
        }
    });

    if let Some(err) = first_error.into_inner() {
        return Err(ZminError::ProcessingError {
            cause: err.to_string(),
        });
    }

    let mut sorted = finished.into_inner();
    sorted.sort_unstable_by_key(|job| job.index);

    let mut out_pos = 0usize;
    for job in &sorted {
        let slice = &job.output[..job.written];
        let needed = out_pos + slice.len();
        if needed > output.len() {
            return Err(ZminError::OutputBufferTooSmall {
                needed,
                available: output.len(),
            });
        }
        output[out_pos..needed].copy_from_slice(slice);
        out_pos = needed;
    }

    Ok(out_pos)
}
