//! goembed - Generate a Go source file that embeds arbitrary bytes
//!
//! This tool reads its input (standard input by default) and writes a Go
//! source file declaring a `[]byte` variable holding exactly those bytes,
//! optionally gzip-compressed and restored by an `init` function.

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use goembed_core::{read_all, EmitConfig, GenerateStats, Generator};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Generate a Go source file embedding the contents of standard input
#[derive(Parser, Debug)]
#[command(name = "goembed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Go package name
    #[arg(long, default_value = "")]
    package: String,

    /// Go var name
    #[arg(long, default_value = "")]
    var: String,

    /// Whether to gzip contents (`--gzip`, `--gzip=true`, `--gzip false`, ...)
    #[arg(
        long,
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_go_bool,
    )]
    gzip: bool,

    /// Read input from this file instead of standard input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the generated source to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn emit_config(&self) -> EmitConfig {
        EmitConfig::new()
            .package(&self.package)
            .var(&self.var)
            .gzip(self.gzip)
    }
}

/// Parse a boolean flag value the way Go's `flag` package does
fn parse_go_bool(s: &str) -> std::result::Result<bool, String> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(format!("invalid boolean value '{}'", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for generated source
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    // The whole input is read before any output is produced
    let raw = read_input(cli.input.as_deref())?;

    let stats = match cli.output {
        Some(ref path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            generate(&cli, raw, BufWriter::new(file))
                .with_context(|| format!("Failed to generate {}", path.display()))?
        }
        None => {
            let stdout = io::stdout();
            generate(&cli, raw, BufWriter::new(stdout.lock()))
                .context("Failed to generate Go source on standard output")?
        }
    };

    info!(
        "Embedded {} bytes as {} payload bytes ({} literal bytes)",
        stats.raw_len, stats.payload_len, stats.literal.written
    );

    Ok(())
}

/// Read the entire input into memory
fn read_input(path: Option<&Path>) -> Result<Bytes> {
    match path {
        Some(path) => {
            debug!("Reading {}", path.display());
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            read_all(file).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            debug!("Reading standard input");
            read_all(io::stdin().lock()).context("Failed to read standard input")
        }
    }
}

/// Generate the Go source for `raw` into `out` and flush it
fn generate<W: Write>(cli: &Cli, raw: Bytes, mut out: W) -> Result<GenerateStats> {
    let generator = Generator::new(cli.emit_config());
    let stats = generator.generate(raw, &mut out)?;
    out.flush().context("Failed to flush output")?;
    Ok(stats)
}
