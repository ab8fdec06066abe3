//! # goembed-core
//!
//! A library for embedding arbitrary bytes in generated Go source code.
//!
//! This crate provides the core functionality for:
//! - Choosing the embedded payload (raw input or its gzip stream)
//! - Encoding any byte sequence as a legal Go string literal body
//! - Emitting the Go declarations, including a startup decompression stub
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`payload`]: Payload selection and gzip compression
//! - [`literal`]: Byte-to-literal encoding and decoding. [`Generator`] encodes
//!   whole in-memory payloads with [`encode_to`]; [`LiteralWriter`] is offered
//!   for library callers that produce their input incrementally.
//! - [`emit`]: Go declaration emission
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use goembed_core::{EmitConfig, Generator};
//!
//! let generator = Generator::new(EmitConfig::new().package("assets").var("Greeting"));
//! let source = generator.generate_to_string(&b"hi\n"[..])?;
//!
//! assert_eq!(source, "package assets\n\nvar Greeting = []byte(\"hi\\n\")\n");
//! # Ok::<(), goembed_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod emit;
pub mod error;
pub mod literal;
pub mod payload;

// Re-export primary types for convenience
pub use emit::{EmitConfig, GenerateStats, Generator};
pub use error::{Error, Result};
pub use literal::{decode, encode, encode_to, EncodeStats, LiteralWriter, Token};
pub use payload::{read_all, Payload};

/// Suffix appended to the variable name for the compressed literal
pub const GZIP_SUFFIX: &str = "_gzip";
