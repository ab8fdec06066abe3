//! Error types for the goembed-core library.
//!
//! Every variant is terminal for a generation run: the generator never
//! retries and never produces a partial-success result.

use thiserror::Error;

/// Result type alias for goembed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all goembed operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read the input stream
    #[error("failed to read input: {source}")]
    InputRead {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The gzip encoder failed while compressing the payload
    #[error("failed to compress payload: {source}")]
    Compression {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The gzip decoder rejected a compressed payload
    #[error("failed to decompress payload: {source}")]
    Decompression {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write generated source to the output
    #[error("failed to write output: {source}")]
    OutputWrite {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A string literal body contained a malformed escape sequence
    #[error("invalid string literal at offset {offset}: {details}")]
    InvalidLiteral {
        /// Byte offset into the literal body where the error occurred
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },
}

impl Error {
    /// Creates a new input read error
    pub fn input_read(source: std::io::Error) -> Self {
        Self::InputRead { source }
    }

    /// Creates a new compression error
    pub fn compression(source: std::io::Error) -> Self {
        Self::Compression { source }
    }

    /// Creates a new decompression error
    pub fn decompression(source: std::io::Error) -> Self {
        Self::Decompression { source }
    }

    /// Creates a new output write error
    pub fn output_write(source: std::io::Error) -> Self {
        Self::OutputWrite { source }
    }

    /// Creates a new invalid literal error
    pub fn invalid_literal(offset: usize, details: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            offset,
            details: details.into(),
        }
    }
}
