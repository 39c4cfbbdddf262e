// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded-memory streaming front end for zmin.
//!
//! Provides the Streaming Minifier (`spec.md` §4.3): a `feed`/`finish`
//! front end that runs the scalar state machine over a sequence of
//! caller-supplied byte slices of arbitrary boundary placement and writes
//! minified output to a [`Sink`] as it goes.
//!
//! - [`sink`] - the output seam, with a blanket impl over [`std::io::Write`]
//! - [`StreamingMinifier`] - the bounded-memory `feed`/`finish` core

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// The streaming core's output seam.
pub mod sink;

use zmin_core::error::{Result, ZminError};
use zmin_core::scalar::MinifierState;

pub use sink::Sink;

/// Size of the internal emit buffer the streaming core batches output
/// bytes into before handing them to the sink. Keeps the cross-call
/// footprint at a small constant number of bytes (`spec.md` §4.3) without
/// calling the sink once per byte.
pub const EMIT_BUFFER_BYTES: usize = 8 * 1024;

/// Bounded-memory streaming minifier.
///
/// The only state carried across [`StreamingMinifier::feed`] calls is the
/// two-boolean [`MinifierState`] plus a small internal emit buffer; the
/// core never buffers unbounded amounts of input or output. Feeding the
/// concatenation of all slices through [`StreamingMinifier::feed`] in
/// order, then calling [`StreamingMinifier::finish`], is equivalent to
/// running the scalar core over that concatenation in one call (`spec.md`
/// §4.3, Testable Property 6) regardless of where slice boundaries fall,
/// including inside strings or escape sequences.
pub struct StreamingMinifier<S: Sink> {
    sink: S,
    state: MinifierState,
    emit_buf: Vec<u8>,
}

impl<S: Sink> StreamingMinifier<S> {
    /// Build a streaming minifier writing to `sink`, starting from the
    /// initial (idle) state.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: MinifierState::new(),
            emit_buf: Vec::with_capacity(EMIT_BUFFER_BYTES),
        }
    }

    /// Feed the next chunk of input. May be called any number of times,
    /// with slices of any length and any boundary placement; the
    /// `(in_string, escaped)` state is preserved across calls.
    ///
    /// # Errors
    ///
    /// Returns [`ZminError::SinkError`] if the sink fails while flushing
    /// the internal emit buffer. The streaming core itself never fails:
    /// `OutputBufferTooSmall` does not apply here since the sink has no
    /// fixed capacity the core enforces.
    pub fn feed(&mut self, input: &[u8]) -> Result<()> {
        for &b in input {
            self.step_and_maybe_flush(b)?;
        }
        Ok(())
    }

    /// Force any buffered output to the sink and report end-of-input.
    ///
    /// Idempotent to call once normally; calling again after a successful
    /// `finish` is a no-op beyond flushing an (empty) buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ZminError::SinkError`] if the final flush fails.
    pub fn finish(&mut self) -> Result<()> {
        self.flush()
    }

    /// The current `(in_string, escaped)` cursor, exposed for callers that
    /// want to assert a stream ended outside a string literal.
    #[must_use]
    pub const fn state(&self) -> MinifierState {
        self.state
    }

    fn step_and_maybe_flush(&mut self, b: u8) -> Result<()> {
        // A one-byte scratch buffer always has enough capacity for
        // `step`'s at-most-one-byte emission, so this can never raise
        // `OutputBufferTooSmall`; the `?` is infallible in practice.
        let mut scratch = [0u8; 1];
        let mut pos = 0usize;
        self.state.step(b, &mut scratch, &mut pos)?;
        if pos == 1 {
            self.emit_buf.push(scratch[0]);
        }
        if self.emit_buf.len() >= EMIT_BUFFER_BYTES {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.emit_buf.is_empty() {
            self.sink.write(&self.emit_buf)?;
            self.emit_buf.clear();
        }
        Ok(())
    }
}
