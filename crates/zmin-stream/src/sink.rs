// SPDX-License-Identifier: MIT OR Apache-2.0
//! The streaming core's output seam.

use std::io;

use zmin_core::error::{Result, ZminError};

/// Destination for minified output bytes, written incrementally as the
/// streaming core produces them.
///
/// A trait rather than a concrete writer type, so the streaming core does
/// not depend on any particular I/O mechanism (`SPEC_FULL.md` §4.3).
pub trait Sink {
    /// Accept the next batch of output bytes. May itself buffer or flush;
    /// the streaming core never assumes either.
    ///
    /// # Errors
    ///
    /// Any I/O failure is surfaced to the caller of the triggering `feed`
    /// or `finish` call as [`ZminError::SinkError`].
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<W: io::Write> Sink for W {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        io::Write::write_all(self, bytes).map_err(|e| ZminError::SinkError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&mut self, _bytes: &[u8]) -> Result<()> {
            Err(ZminError::SinkError("disk full".to_string()))
        }
    }

    #[test]
    fn vec_sink_accumulates_bytes() {
        let mut out = Vec::new();
        Sink::write(&mut out, b"hello").unwrap();
        Sink::write(&mut out, b" world").unwrap();
        assert_eq!(out, b"hello world");
    }

    #[test]
    fn failing_sink_surfaces_sink_error() {
        let mut sink = FailingSink;
        let err = Sink::write(&mut sink, b"x").unwrap_err();
        assert!(matches!(err, ZminError::SinkError(_)));
    }
}
