//! Go declaration emission.
//!
//! This module writes the Go source file around the encoded literal: the
//! package clause, the variable declaration and, for compressed payloads,
//! the imports and `init` function that gunzip the data at program start.
//!
//! ## Output Layout
//!
//! Uncompressed:
//!
//! ```text
//! package assets
//!
//! var Logo = []byte("...")
//! ```
//!
//! Compressed, the plain variable is declared empty and filled in by `init`
//! from a second `_gzip` variable holding the compressed literal.

use crate::error::{Error, Result};
use crate::literal::{self, EncodeStats};
use crate::payload::Payload;
use crate::GZIP_SUFFIX;
use bytes::Bytes;
use std::io::Write;
use tracing::{debug, trace};

/// Imports needed by the decompression stub
const GZIP_IMPORTS: &str = r#"import (
	"bytes"
	"compress/gzip"
	"io"
)
"#;

/// Placeholder for the variable name in [`GZIP_INIT`]
const VAR_PLACEHOLDER: &str = "{{VAR}}";

/// Startup function that restores the plain variable from the compressed one
///
/// The generated program panics if the compressed data is corrupt.
const GZIP_INIT: &str = r#"func init() {
	r, err := gzip.NewReader(bytes.NewReader({{VAR}}_gzip))
	if err != nil {
		panic(err)
	}
	defer r.Close()
	{{VAR}}, err = io.ReadAll(r)
	if err != nil {
		panic(err)
	}
}
"#;

/// Configuration for a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitConfig {
    /// Go package name written into the package clause
    pub package: String,
    /// Go variable name holding the embedded bytes
    pub var: String,
    /// Gzip the payload and emit the decompression stub
    pub gzip: bool,
}

impl EmitConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Go package name
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.package = name.into();
        self
    }

    /// Sets the Go variable name
    pub fn var(mut self, name: impl Into<String>) -> Self {
        self.var = name.into();
        self
    }

    /// Sets whether to gzip the payload
    pub fn gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    /// Name of the variable holding the compressed literal
    pub fn gzip_var(&self) -> String {
        format!("{}{}", self.var, GZIP_SUFFIX)
    }
}

/// Summary of a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Length of the input
    pub raw_len: usize,
    /// Length of the embedded payload (compressed length when gzipped)
    pub payload_len: usize,
    /// Literal encoding counters
    pub literal: EncodeStats,
}

/// Generates Go source embedding a byte sequence
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: EmitConfig,
}

impl Generator {
    /// Creates a new generator with the given configuration
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Returns the generator's configuration
    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Generate the Go source for `raw` into `out`
    ///
    /// Output is written as it is produced; on error, whatever was already
    /// written stays written.
    pub fn generate<W: Write + ?Sized>(
        &self,
        raw: impl Into<Bytes>,
        out: &mut W,
    ) -> Result<GenerateStats> {
        let payload = Payload::select(raw.into(), self.config.gzip)?;

        trace!("Writing package clause for {:?}", self.config.package);
        writeln!(out, "package {}", self.config.package).map_err(Error::output_write)?;
        writeln!(out).map_err(Error::output_write)?;

        let written = if payload.is_compressed() {
            self.write_compressed(&payload, out)
        } else {
            self.write_plain(&payload, out)
        };
        let literal = written.map_err(Error::output_write)?;

        debug!(
            "Encoded {} payload bytes into {} literal bytes ({} escaped)",
            literal.consumed, literal.written, literal.escaped
        );

        Ok(GenerateStats {
            raw_len: payload.raw_len(),
            payload_len: payload.len(),
            literal,
        })
    }

    /// Generate the Go source for `raw` as a string
    pub fn generate_to_string(&self, raw: impl Into<Bytes>) -> Result<String> {
        let mut out = Vec::new();
        self.generate(raw, &mut out)?;
        // Only valid UTF-8 ever passes through the literal encoder unescaped
        String::from_utf8(out).map_err(|e| {
            Error::output_write(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn write_plain<W: Write + ?Sized>(
        &self,
        payload: &Payload,
        out: &mut W,
    ) -> std::io::Result<EncodeStats> {
        write!(out, "var {} = []byte(\"", self.config.var)?;
        let stats = literal::encode_to(payload.as_bytes(), out)?;
        writeln!(out, "\")")?;
        Ok(stats)
    }

    fn write_compressed<W: Write + ?Sized>(
        &self,
        payload: &Payload,
        out: &mut W,
    ) -> std::io::Result<EncodeStats> {
        let var = &self.config.var;

        out.write_all(GZIP_IMPORTS.as_bytes())?;
        writeln!(out)?;
        writeln!(out, "var {} []byte // set in init", var)?;
        writeln!(out)?;

        write!(out, "var {} = []byte(\"", self.config.gzip_var())?;
        let stats = literal::encode_to(payload.as_bytes(), out)?;
        writeln!(out, "\")")?;
        writeln!(out)?;

        out.write_all(GZIP_INIT.replace(VAR_PLACEHOLDER, var).as_bytes())?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::decode;
    use crate::payload::decompress;
    use pretty_assertions::assert_eq;

    /// Extract the literal body from a `var <name> = []byte("...")` line
    fn literal_of<'a>(source: &'a str, var: &str) -> &'a str {
        let prefix = format!("var {} = []byte(\"", var);
        let line = source
            .lines()
            .find(|l| l.starts_with(&prefix))
            .expect("declaration not found");
        line[prefix.len()..]
            .strip_suffix("\")")
            .expect("unterminated declaration")
    }

    #[test]
    fn test_empty_input() {
        let generator = Generator::new(EmitConfig::new().package("assets").var("Data"));
        let source = generator.generate_to_string(Bytes::new()).unwrap();

        assert_eq!(source, "package assets\n\nvar Data = []byte(\"\")\n");
    }

    #[test]
    fn test_plain_declaration() {
        let generator = Generator::new(EmitConfig::new().package("main").var("msg"));
        let source = generator.generate_to_string(&b"hello\nworld\"!"[..]).unwrap();

        assert_eq!(
            source,
            "package main\n\nvar msg = []byte(\"hello\\nworld\\\"!\")\n"
        );
    }

    #[test]
    fn test_nul_and_invalid_bytes() {
        let generator = Generator::new(EmitConfig::new().package("p").var("v"));
        let source = generator.generate_to_string(vec![0x00_u8, 0x80]).unwrap();
        assert_eq!(literal_of(&source, "v"), r"\x00\x80");
    }

    #[test]
    fn test_multibyte_character() {
        let generator = Generator::new(EmitConfig::new().package("p").var("v"));
        let source = generator.generate_to_string("€".as_bytes().to_vec()).unwrap();
        assert_eq!(literal_of(&source, "v"), "€");
    }

    #[test]
    fn test_default_config_emits_empty_names() {
        let source = Generator::default().generate_to_string(&b"x"[..]).unwrap();
        assert_eq!(source, "package \n\nvar  = []byte(\"x\")\n");
    }

    #[test]
    fn test_gzip_layout() {
        let generator = Generator::new(EmitConfig::new().package("assets").var("Blob").gzip(true));
        let source = generator.generate_to_string(&b"abc"[..]).unwrap();

        let package = source.find("package assets\n").unwrap();
        let imports = source.find("import (").unwrap();
        let plain = source.find("var Blob []byte // set in init\n").unwrap();
        let compressed = source.find("var Blob_gzip = []byte(\"").unwrap();
        let init = source.find("func init() {").unwrap();

        assert!(package < imports);
        assert!(imports < plain);
        assert!(plain < compressed);
        assert!(compressed < init);

        assert!(source.contains("gzip.NewReader(bytes.NewReader(Blob_gzip))"));
        assert!(source.contains("\tBlob, err = io.ReadAll(r)\n"));
        assert!(source.contains("panic(err)"));
        assert!(!source.contains(VAR_PLACEHOLDER));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn test_gzip_round_trip() {
        let input = "All work and no play makes Jack a dull boy.\n".repeat(228);
        let input = &input.as_bytes()[..10_000];

        let generator = Generator::new(EmitConfig::new().package("p").var("text").gzip(true));
        let mut out = Vec::new();
        let stats = generator.generate(input.to_vec(), &mut out).unwrap();
        let source = String::from_utf8(out).unwrap();

        assert_eq!(stats.raw_len, 10_000);
        assert!(stats.payload_len < stats.raw_len);
        assert_eq!(stats.literal.consumed, stats.payload_len);

        let compressed = decode(literal_of(&source, "text_gzip")).unwrap();
        assert_eq!(compressed.len(), stats.payload_len);
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_round_trip_through_declaration() {
        let input: Vec<u8> = (0..=255u8).chain("\u{FEFF}é".bytes()).collect();
        let generator = Generator::new(EmitConfig::new().package("p").var("all"));
        let source = generator.generate_to_string(input.clone()).unwrap();

        assert_eq!(decode(literal_of(&source, "all")).unwrap(), input);
    }

    #[test]
    fn test_output_is_deterministic() {
        let input = b"deterministic \x00\xff output".repeat(100);
        for gzip in [false, true] {
            let generator = Generator::new(EmitConfig::new().package("p").var("v").gzip(gzip));
            let first = generator.generate_to_string(input.clone()).unwrap();
            let second = generator.generate_to_string(input.clone()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_write_failure_is_output_error() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = Generator::default()
            .generate(&b"data"[..], &mut FailingWriter)
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
    }

    #[test]
    fn test_config_builder() {
        let config = EmitConfig::new().package("pkg").var("Asset").gzip(true);

        assert_eq!(config.package, "pkg");
        assert_eq!(config.var, "Asset");
        assert!(config.gzip);
        assert_eq!(config.gzip_var(), "Asset_gzip");
    }
}
