//! exif-probe - Inspect Exif, TIFF and JPEG metadata from the command line.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_probe::{
    config::{Cli, Command, DumpConfig, OutputFormat, SegmentsConfig},
    read_metadata_from_path,
    report::{MetadataReport, SegmentReport},
    JpegSegmentReader,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Dump(config) => run_dump(config),
        Command::Segments(config) => run_segments(config),
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_probe=debug"
    } else {
        "exif_probe=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Dump Command
// =============================================================================

fn run_dump(config: DumpConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let metadata = match read_metadata_from_path(&config.path, &config.extract_options()) {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to read {}: {}", config.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    debug!(
        directories = metadata.directory_count(),
        "metadata extracted"
    );
    if metadata.has_errors() {
        warn!("{} contains metadata errors", config.path.display());
    }

    let report = MetadataReport::from_metadata(&metadata);
    match config.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Segments Command
// =============================================================================

fn run_segments(config: SegmentsConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let segments = match JpegSegmentReader::read_segments_from_path(&config.path, None) {
        Ok(segments) => segments,
        Err(e) => {
            error!("Failed to scan {}: {}", config.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let reports = SegmentReport::from_segments(&segments);
    if reports.is_empty() {
        println!("(no segments before image data)");
    } else {
        print!("{}", SegmentReport::to_text(&reports));
    }

    ExitCode::SUCCESS
}
