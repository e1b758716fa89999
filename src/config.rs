//! Command-line configuration for exif-probe.
//!
//! Options can be given as flags or through environment variables with the
//! `EXIF_PROBE_` prefix:
//!
//! - `EXIF_PROBE_VERBOSE` - Enable debug logging
//! - `EXIF_PROBE_FORMAT` - Output format for `dump` (text or json)
//! - `EXIF_PROBE_MAX_FORMAT_ERRORS` - Invalid format codes tolerated per IFD (default: 5)
//! - `EXIF_PROBE_CHUNK_LEN` - Stream read chunk size in bytes (default: 2048)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::extract::ExtractOptions;
use crate::format::tiff::DEFAULT_MAX_FORMAT_ERRORS;
use crate::io::DEFAULT_CHUNK_LEN;

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-probe - Inspect Exif, TIFF and JPEG metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false, env = "EXIF_PROBE_VERBOSE")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decode a file and print every directory, tag and error.
    Dump(DumpConfig),

    /// List the segments of a JPEG file.
    Segments(SegmentsConfig),
}

/// Output format for the `dump` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per tag
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct DumpConfig {
    /// File to read (JPEG, TIFF, ORF or RW2).
    pub path: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_PROBE_FORMAT")]
    pub format: OutputFormat,

    /// Invalid TIFF format codes tolerated in one IFD before it is abandoned.
    #[arg(long, default_value_t = DEFAULT_MAX_FORMAT_ERRORS, env = "EXIF_PROBE_MAX_FORMAT_ERRORS")]
    pub max_format_errors: usize,

    /// Bytes pulled per read when decoding a TIFF from the file.
    #[arg(long, default_value_t = DEFAULT_CHUNK_LEN, env = "EXIF_PROBE_CHUNK_LEN")]
    pub chunk_len: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentsConfig {
    /// JPEG file to scan.
    pub path: PathBuf,
}

impl DumpConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_len == 0 {
            return Err("chunk_len must be greater than 0".to_string());
        }
        validate_path(&self.path)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_format_errors: self.max_format_errors,
            chunk_len: self.chunk_len,
        }
    }
}

impl SegmentsConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_path(&self.path)
    }
}

fn validate_path(path: &std::path::Path) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("{} is not a readable file", path.display()));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
