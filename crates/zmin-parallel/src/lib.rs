// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adaptive chunking and work-stealing parallel execution for zmin.
//!
//! - [`chunker`] - partitions the input and snaps boundaries outside strings
//! - [`dispenser`] - the lock-free chunk-index source workers share
//! - [`executor`] - spawns workers and reassembles their output
//! - [`job`] - a single worker's unit of work

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Adaptive Chunker: input partitioning and string-safe boundary snapping
pub mod chunker;
/// Lock-free work dispenser shared by parallel workers
pub mod dispenser;
/// Parallel Executor: thread pool and result reassembly
pub mod executor;
/// A single chunk job
pub mod job;

pub use chunker::{AdaptiveChunker, ChunkPlan};
pub use dispenser::WorkDispenser;
pub use executor::execute as minify_parallel;
pub use job::ChunkJob;
