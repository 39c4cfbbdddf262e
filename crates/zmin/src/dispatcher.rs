// SPDX-License-Identifier: MIT OR Apache-2.0
//! The Strategy Dispatcher: top-level policy tying capability detection,
//! the scalar/vectorized/parallel/streaming cores, and the public
//! ECO/SPORT/TURBO surface together (`spec.md` §4.6).

use std::time::Instant;

use zmin_core::capability::{CapabilityReport, Detector, SimdLevel};
use zmin_core::config::MinifyConfig;
use zmin_core::error::{Result, ZminError};
use zmin_core::result::{MinifyResult, Strategy};
use zmin_parallel::chunker::AdaptiveChunker;
use zmin_stream::StreamingMinifier;

use crate::mode::Mode;
use crate::slice_sink::SliceSink;

/// Below this size the Adaptive Chunker always collapses to one chunk
/// (see `zmin_parallel::chunker::AdaptiveChunker`); mirrored here only for
/// the auto-selection thresholds, not duplicated logic.
const SMALL_INPUT_THRESHOLD: usize = 64 * 1024;
/// Above this size `auto` selection escalates to Parallel on a multi-core
/// host (`spec.md` §4.6 step 3/4 boundary).
const LARGE_INPUT_THRESHOLD: usize = 10 * 1024 * 1024;

/// Owns a [`CapabilityReport`] captured once at construction (Design Note
/// §9: an explicit handle in place of process-global singletons) and
/// dispatches `minify` calls to the chosen strategy.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    capability: CapabilityReport,
}

impl Dispatcher {
    /// Idempotent process-wide initialization (`spec.md` §6 `init()`):
    /// probes the machine once and returns an owned handle. Calling this
    /// repeatedly is safe and simply re-probes; no global state is
    /// mutated.
    #[must_use]
    pub fn init() -> Self {
        Self {
            capability: Detector::new().probe(),
        }
    }

    /// Build a dispatcher around an already-known capability report
    /// (useful for tests that need to pin a specific core count or SIMD
    /// tier without depending on the host machine).
    #[must_use]
    pub const fn with_capability(capability: CapabilityReport) -> Self {
        Self { capability }
    }

    /// The cached capability snapshot this dispatcher was built from.
    #[must_use]
    pub const fn capability(&self) -> CapabilityReport {
        self.capability
    }

    /// Full-control entry point: resolve a strategy from `config` (or run
    /// the five-step auto-selection policy if `config.strategy` is
    /// `None`) and execute it, writing into `output`.
    ///
    /// # Errors
    ///
    /// See the error taxonomy in `zmin_core::error::ZminError`:
    /// [`ZminError::InputTooLarge`] if the input exceeds the configured
    /// memory budget and Streaming was not selected,
    /// [`ZminError::StrategyUnavailable`] if an explicitly requested
    /// strategy cannot run on this machine, and the per-strategy errors
    /// documented on each core.
    pub fn minify(&self, input: &[u8], output: &mut [u8], config: &MinifyConfig) -> Result<MinifyResult> {
        let start = Instant::now();
        let strategy = self.resolve_strategy(input.len(), config)?;

        if strategy != Strategy::Streaming && input.len() > config.max_memory_bytes {
            return Err(ZminError::InputTooLarge {
                input_len: input.len(),
                max_memory_bytes: config.max_memory_bytes,
            });
        }

        let (bytes_written, peak_memory_bytes) = self.run(strategy, input, output, config)?;

        Ok(MinifyResult {
            bytes_written,
            elapsed: start.elapsed(),
            peak_memory_bytes,
            strategy_used: strategy,
        })
    }

    /// Library-surface entry point (`spec.md` §6): minify `input` under a
    /// caller-chosen performance [`Mode`], using the default memory
    /// budget. Returns the minified bytes and the `spec.md` §6/§7
    /// boundary integer error code (`0` on success).
    #[must_use]
    pub fn minify_mode(&self, input: &[u8], mode: Mode) -> (Vec<u8>, i32) {
        let config = MinifyConfig::new().with_strategy(mode.resolve(&self.capability, input.len(), true));
        let mut output = vec![0u8; crate::estimate_output_size(input.len())];
        match self.minify(input, &mut output, &config) {
            Ok(result) => {
                output.truncate(result.bytes_written);
                (output, 0)
            }
            Err(err) => (Vec::new(), err.code()),
        }
    }

    fn resolve_strategy(&self, input_len: usize, config: &MinifyConfig) -> Result<Strategy> {
        if let Some(strategy) = config.strategy {
            self.check_available(strategy, config)?;
            return Ok(strategy);
        }

        // `spec.md` §4.6 five-step auto-selection policy.
        if config.max_memory_bytes < input_len {
            return Ok(Strategy::Streaming);
        }
        if input_len < SMALL_INPUT_THRESHOLD {
            return Ok(Strategy::Scalar);
        }
        if input_len < LARGE_INPUT_THRESHOLD {
            return Ok(self.simd_or_scalar(config));
        }
        if self.capability.core_count >= 2 {
            return Ok(Strategy::Parallel);
        }
        Ok(self.simd_or_scalar(config))
    }

    fn simd_or_scalar(&self, config: &MinifyConfig) -> Strategy {
        if config.enable_simd && self.capability.simd_level != SimdLevel::None {
            Strategy::Vectorized
        } else {
            Strategy::Scalar
        }
    }

    /// Explicit-strategy availability guard (`spec.md` §7
    /// `StrategyUnavailable`): only applies when the caller pinned a
    /// strategy; auto-selection never picks an unsupported one.
    fn check_available(&self, strategy: Strategy, config: &MinifyConfig) -> Result<()> {
        match strategy {
            Strategy::Parallel if self.capability.core_count < 2 => Err(ZminError::StrategyUnavailable {
                reason: "Parallel strategy requested on a single-core host".to_string(),
            }),
            Strategy::Vectorized if !config.enable_simd || self.capability.simd_level == SimdLevel::None => {
                Err(ZminError::StrategyUnavailable {
                    reason: "Vectorized strategy requested but no SIMD tier is available".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn run(
        &self,
        strategy: Strategy,
        input: &[u8],
        output: &mut [u8],
        config: &MinifyConfig,
    ) -> Result<(usize, usize)> {
        match strategy {
            Strategy::Scalar => {
                let written = zmin_core::scalar::minify_scalar(input, output)?;
                Ok((written, 0))
            }
            Strategy::Vectorized => {
                let written = zmin_simd::minify_vectorized(input, output, self.capability.simd_level)?;
                Ok((written, 0))
            }
            Strategy::Parallel => self.run_parallel(input, output, config),
            Strategy::Streaming => {
                let mut sink = SliceSink::new(output);
                let mut streamer = StreamingMinifier::new(&mut sink);
                streamer.feed(input)?;
                streamer.finish()?;
                Ok((sink.written(), zmin_stream::EMIT_BUFFER_BYTES))
            }
        }
    }

    fn run_parallel(&self, input: &[u8], output: &mut [u8], config: &MinifyConfig) -> Result<(usize, usize)> {
        let requested_workers = config.worker_count.unwrap_or(self.capability.core_count);
        let chunker = AdaptiveChunker::new(requested_workers, config.chunk_size_override);
        let plan = chunker.plan(input.len(), &self.capability);
        let boundaries = AdaptiveChunker::boundaries(input, &plan);

        let simd_level = if config.enable_simd {
            self.capability.simd_level
        } else {
            SimdLevel::None
        };

        let written = zmin_parallel::minify_parallel(input, output, &boundaries, plan.worker_count, simd_level)?;
        // Per-chunk output buffers (`ChunkJob::output`) are the dominant
        // bookkeeping allocation; approximate peak memory as one buffer
        // per chunk in flight.
        let peak_memory_bytes = plan.chunk_size.saturating_mul(plan.worker_count);
        Ok((written, peak_memory_bytes))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capability(core_count: usize, simd_level: SimdLevel) -> CapabilityReport {
        CapabilityReport {
            core_count,
            simd_level,
            memory_bytes: 1 << 30,
            numa_nodes: 1,
        }
    }

    #[test]
    fn explicit_scalar_strategy_runs() {
        let dispatcher = Dispatcher::with_capability(capability(4, SimdLevel::Bit256));
        let input = br#"{ "a" : 1 }"#;
        let mut output = vec![0u8; input.len()];
        let config = MinifyConfig::new().with_strategy(Strategy::Scalar);
        let result = dispatcher.minify(input, &mut output, &config).unwrap();
        assert_eq!(result.strategy_used, Strategy::Scalar);
        assert_eq!(&output[..result.bytes_written], br#"{"a":1}"#);
    }

    #[test]
    fn explicit_parallel_on_single_core_is_unavailable() {
        let dispatcher = Dispatcher::with_capability(capability(1, SimdLevel::None));
        let input = vec![b'1'; 1024];
        let mut output = vec![0u8; input.len()];
        let config = MinifyConfig::new().with_strategy(Strategy::Parallel);
        let err = dispatcher.minify(&input, &mut output, &config).unwrap_err();
        assert!(matches!(err, ZminError::StrategyUnavailable { .. }));
    }

    #[test]
    fn explicit_vectorized_without_simd_is_unavailable() {
        let dispatcher = Dispatcher::with_capability(capability(4, SimdLevel::None));
        let input = br#"{"a": 1}"#;
        let mut output = vec![0u8; input.len()];
        let config = MinifyConfig::new().with_strategy(Strategy::Vectorized);
        let err = dispatcher.minify(input, &mut output, &config).unwrap_err();
        assert!(matches!(err, ZminError::StrategyUnavailable { .. }));
    }

    #[test]
    fn auto_selects_scalar_for_small_input() {
        let dispatcher = Dispatcher::with_capability(capability(8, SimdLevel::Bit256));
        let input = br#"{"a": 1}"#;
        let mut output = vec![0u8; input.len()];
        let result = dispatcher.minify(input, &mut output, &MinifyConfig::new()).unwrap();
        assert_eq!(result.strategy_used, Strategy::Scalar);
    }

    #[test]
    fn auto_selects_streaming_over_memory_budget() {
        let dispatcher = Dispatcher::with_capability(capability(8, SimdLevel::Bit256));
        let input = vec![b'1'; 4096];
        let mut output = vec![0u8; input.len()];
        let config = MinifyConfig::new().with_max_memory_bytes(1024);
        let result = dispatcher.minify(&input, &mut output, &config).unwrap();
        assert_eq!(result.strategy_used, Strategy::Streaming);
    }

    #[test]
    fn auto_selects_parallel_for_large_multicore_input() {
        let dispatcher = Dispatcher::with_capability(capability(8, SimdLevel::Bit256));
        let input: Vec<u8> = br#"{"k": "v"}, "#.iter().cloned().cycle().take(11 * 1024 * 1024).collect();
        let mut output = vec![0u8; input.len()];
        let result = dispatcher.minify(&input, &mut output, &MinifyConfig::new()).unwrap();
        assert_eq!(result.strategy_used, Strategy::Parallel);
    }

    #[test]
    fn minify_mode_eco_is_bounded_memory_streaming() {
        let dispatcher = Dispatcher::with_capability(capability(8, SimdLevel::Bit256));
        let input = br#"{  "a"  :  1  }"#;
        let (out, code) = dispatcher.minify_mode(input, Mode::Eco);
        assert_eq!(code, 0);
        assert_eq!(out, br#"{"a":1}"#);
    }

    #[test]
    fn explicit_minify_error_code_matches_taxonomy() {
        let dispatcher = Dispatcher::with_capability(capability(1, SimdLevel::None));
        let input = vec![b'1'; 1024];
        let mut output = vec![0u8; 1];
        let config = MinifyConfig::new().with_strategy(Strategy::Scalar);
        let err = dispatcher.minify(&input, &mut output, &config).unwrap_err();
        assert_eq!(err.code(), -2);
    }
}
