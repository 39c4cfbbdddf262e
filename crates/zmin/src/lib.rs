// SPDX-License-Identifier: MIT OR Apache-2.0
//! `zmin` — a high-throughput JSON minifier.
//!
//! `zmin` consumes a byte stream that is purportedly JSON and emits an
//! equivalent byte stream with all insignificant whitespace removed,
//! preserving every string literal byte-for-byte. The semantic reference
//! is a three-state byte-at-a-time state machine
//! ([`zmin_core::scalar::minify_scalar`]); everything else in the
//! workspace — SIMD block acceleration, adaptive-chunked parallel
//! execution, and a bounded-memory streaming front end — is required to
//! reproduce that reference byte-for-byte (see `SPEC_FULL.md` Testable
//! Property 1).
//!
//! This crate is the umbrella: it re-exports the constituent crates, owns
//! the [`Dispatcher`] that ties capability detection to strategy
//! selection, and exposes the library surface from `spec.md` §6:
//!
//! - [`init`] — probe the machine once, returning a [`Dispatcher`] handle.
//! - [`Dispatcher::minify_mode`] — the `minify(input, mode)` entry point,
//!   `mode` one of [`Mode::Eco`], [`Mode::Sport`], [`Mode::Turbo`].
//! - [`get_version`] — the crate's semantic version.
//! - [`estimate_output_size`] — a conservative output-buffer size hint.
//! - [`Validator`] — the out-of-scope `validate` seam.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// The Strategy Dispatcher: capability-aware strategy selection and
/// execution.
pub mod dispatcher;
/// The public `{Eco, Sport, Turbo}` profile selector.
pub mod mode;
mod slice_sink;
/// The out-of-scope `validate` seam.
pub mod validator;

pub use dispatcher::Dispatcher;
pub use mode::Mode;
pub use validator::Validator;

pub use zmin_core::capability::{CapabilityReport, Detector, SimdLevel};
pub use zmin_core::config::MinifyConfig;
pub use zmin_core::error::{Result, ZminError};
pub use zmin_core::result::{MinifyResult, Strategy};
pub use zmin_core::scalar::minify_scalar;
pub use zmin_simd::minify_vectorized;
pub use zmin_stream::{Sink, StreamingMinifier};

/// Idempotent process-wide initialization (`spec.md` §6): probes the
/// machine's capabilities once and returns an owned [`Dispatcher`]
/// handle. Calling it more than once is harmless — each call re-probes
/// and returns an independent handle rather than mutating shared state
/// (Design Note §9: no process-global singleton).
#[must_use]
pub fn init() -> Dispatcher {
    Dispatcher::init()
}

/// This crate's version, as recorded in `Cargo.toml`.
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// A conservative output-buffer size hint for an input of `input_len`
/// bytes. Minification never enlarges its input (`spec.md` §6), so the
/// slack is `0`; the function still exists as a named seam in case a
/// future format addition ever needs one.
#[must_use]
pub const fn estimate_output_size(input_len: usize) -> usize {
    const SLACK: usize = 0;
    input_len + SLACK
}
