// SPDX-License-Identifier: MIT OR Apache-2.0
//! Caller-facing configuration for a single minify call.

use crate::result::Strategy;

/// Caller preferences for a minify call. Read-only for the duration of the
/// call; the caller owns it (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct MinifyConfig {
    /// Explicit strategy choice, or `None` to let the dispatcher decide
    /// (`spec.md` §4.6).
    pub strategy: Option<Strategy>,
    /// Maximum memory the caller allows this call to use. Streaming is
    /// forced when the input would exceed this budget.
    pub max_memory_bytes: usize,
    /// Override for the requested worker count in the Parallel strategy;
    /// `None` defers to the capability report's core count.
    pub worker_count: Option<usize>,
    /// Whether SIMD acceleration may be used at all.
    pub enable_simd: bool,
    /// Override for the Adaptive Chunker's chunk size; `None` lets the
    /// chunker compute one from input length, core count, and memory.
    pub chunk_size_override: Option<usize>,
}

impl MinifyConfig {
    /// The default 64 MiB memory budget and no overrides, matching the
    /// size thresholds used by the dispatcher's auto-selection (`spec.md`
    /// §4.6: 64 KiB and 10 MiB breakpoints live well under this).
    const DEFAULT_MAX_MEMORY_BYTES: usize = 64 * 1024 * 1024;

    /// Auto strategy, default memory budget, SIMD enabled, no overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: None,
            max_memory_bytes: Self::DEFAULT_MAX_MEMORY_BYTES,
            worker_count: None,
            enable_simd: true,
            chunk_size_override: None,
        }
    }

    /// Pin a specific strategy instead of letting the dispatcher choose.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the memory budget in bytes.
    #[must_use]
    pub const fn with_max_memory_bytes(mut self, max_memory_bytes: usize) -> Self {
        self.max_memory_bytes = max_memory_bytes;
        self
    }

    /// Override the worker count used by the Parallel strategy.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    /// Disable SIMD acceleration even if the machine supports it.
    #[must_use]
    pub const fn without_simd(mut self) -> Self {
        self.enable_simd = false;
        self
    }

    /// Override the Adaptive Chunker's chunk size.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size_override = Some(chunk_size);
        self
    }
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let cfg = MinifyConfig::new()
            .with_strategy(Strategy::Scalar)
            .with_max_memory_bytes(1024)
            .with_worker_count(4)
            .without_simd()
            .with_chunk_size(4096);
        assert_eq!(cfg.strategy, Some(Strategy::Scalar));
        assert_eq!(cfg.max_memory_bytes, 1024);
        assert_eq!(cfg.worker_count, Some(4));
        assert!(!cfg.enable_simd);
        assert_eq!(cfg.chunk_size_override, Some(4096));
    }
}
