// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error taxonomy shared by every strategy in the zmin workspace.

/// Result alias using [`ZminError`].
pub type Result<T> = std::result::Result<T, ZminError>;

/// Errors a minify call can surface.
///
/// Every variant maps to one of the boundary integer codes documented at the
/// library surface (see [`ZminError::code`]); no variant is retried
/// internally, and none carry partial output back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ZminError {
    /// The caller's output buffer could not hold the minified result.
    ///
    /// The emit that would have overflowed is the point of failure; bytes
    /// written before it are left in the buffer, but the reported length is
    /// zero.
    #[error("output buffer too small: needed at least {needed} bytes, had {available}")]
    OutputBufferTooSmall {
        /// Minimum capacity that would have sufficed, if known.
        needed: usize,
        /// Capacity the caller actually supplied.
        available: usize,
    },

    /// The input exceeds the caller's configured memory budget and the
    /// Streaming strategy was not selected to bound memory use.
    #[error("input of {input_len} bytes exceeds the {max_memory_bytes} byte memory budget")]
    InputTooLarge {
        /// Length of the input that was rejected.
        input_len: usize,
        /// The configured ceiling it exceeded.
        max_memory_bytes: usize,
    },

    /// The caller explicitly requested a strategy the machine cannot serve
    /// (Parallel on a single-core host, or SIMD where none is available).
    #[error("strategy unavailable: {reason}")]
    StrategyUnavailable {
        /// Human-readable explanation of why the strategy can't run.
        reason: String,
    },

    /// A parallel worker failed; the first underlying cause is preserved.
    #[error("processing error: {cause}")]
    ProcessingError {
        /// The first worker-observed failure, in text form.
        cause: String,
    },

    /// The streaming sink reported an I/O failure.
    #[error("sink error: {0}")]
    SinkError(String),

    /// An unrecognized strategy selector was supplied at the library
    /// boundary.
    #[error("invalid mode: {0}")]
    InvalidMode(String),
}

impl ZminError {
    /// Integer error code used at the `minify`/`get_version`-style library
    /// boundary (see `spec.md` §6).
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InputTooLarge { .. }
            | Self::OutputBufferTooSmall { .. }
            | Self::ProcessingError { .. } => -2,
            Self::InvalidMode(_) => -3,
            Self::StrategyUnavailable { .. } | Self::SinkError(_) => -99,
        }
    }
}

/// Wraps a std I/O error as a [`ZminError::SinkError`].
impl From<std::io::Error> for ZminError {
    fn from(err: std::io::Error) -> Self {
        Self::SinkError(err.to_string())
    }
}
