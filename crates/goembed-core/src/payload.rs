//! Payload selection and gzip compression.
//!
//! The payload is the byte sequence that actually ends up inside the
//! generated string literal: either the raw input, or its gzip stream at
//! maximum compression when compression is requested.

use crate::error::{Error, Result};
use bytes::Bytes;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use tracing::debug;

/// The bytes selected for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The input embedded as-is
    Raw(Bytes),
    /// The input's gzip stream
    Gzip {
        /// The compressed bytes
        compressed: Bytes,
        /// Length of the uncompressed input
        raw_len: usize,
    },
}

impl Payload {
    /// Select the payload for `raw`, compressing it when `use_compression` is set
    pub fn select(raw: Bytes, use_compression: bool) -> Result<Self> {
        if !use_compression {
            debug!("Embedding {} bytes uncompressed", raw.len());
            return Ok(Payload::Raw(raw));
        }

        let compressed = compress(&raw)?;
        debug!(
            "Compressed {} bytes to {} bytes",
            raw.len(),
            compressed.len()
        );

        Ok(Payload::Gzip {
            compressed: Bytes::from(compressed),
            raw_len: raw.len(),
        })
    }

    /// The bytes to encode into the literal
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Raw(data) => &data[..],
            Payload::Gzip { compressed, .. } => &compressed[..],
        }
    }

    /// Returns true if the payload is a gzip stream
    pub fn is_compressed(&self) -> bool {
        matches!(self, Payload::Gzip { .. })
    }

    /// Length of the original input
    pub fn raw_len(&self) -> usize {
        match self {
            Payload::Raw(data) => data.len(),
            Payload::Gzip { raw_len, .. } => *raw_len,
        }
    }

    /// Length of the embedded bytes
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if there are no embedded bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read `reader` to the end into an immutable buffer
///
/// The whole input is held in memory before any payload is selected.
pub fn read_all<R: Read>(mut reader: R) -> Result<Bytes> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(Error::input_read)?;
    debug!("Read {} input bytes", data.len());
    Ok(Bytes::from(data))
}

/// Gzip `raw` at the best compression level
///
/// The gzip header carries no timestamp or file name, so the output depends
/// only on the input bytes.
pub fn compress(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(raw).map_err(Error::compression)?;
    encoder.finish().map_err(Error::compression)
}

/// Gunzip `data` completely into memory
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(Error::decompression)?;
    Ok(out)
}
