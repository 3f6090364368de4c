//! Minuta application entry point.
//!
//! Loads configuration, lists meeting-notes documents, extracts the target
//! person's action items and writes one card per item.

mod cli;
mod runner;
mod sink;
mod source;
mod tracker;

use std::path::PathBuf;

use clap::Parser;

use minuta_core::config::MinutaConfig;
use minuta_core::error::MinutaError;
use minuta_extract::ExtractionPipeline;

use crate::cli::CliArgs;
use crate::runner::{ProcessingRun, RunOptions};
use crate::sink::{CardSink, JsonLinesSink, PassthroughRewriter, StdoutSink};
use crate::source::DirectorySource;
use crate::tracker::ProcessedSet;

/// Expand a leading `~/` to the user's home directory.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level applies; the fallback
    // warning is emitted once the subscriber is up.
    let config_file = args.resolve_config_path();
    let (config, config_error) = match MinutaConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (MinutaConfig::default(), Some(e)),
    };

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting Minuta v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!(
            "Failed to load config from {}: {}. Using defaults.",
            config_file.display(),
            e
        );
    }

    let target_name_pattern = args.resolve_name_pattern(&config);
    if target_name_pattern.trim().is_empty() {
        return Err(MinutaError::Config(
            "No target name pattern: pass --name, set MINUTA_NAME or extraction.target_name_pattern"
                .to_string(),
        )
        .into());
    }

    let data_dir = resolve_data_dir(&config.general.data_dir);
    let tracker_path = data_dir.join(&config.tracker.file_name);
    let mut tracker = ProcessedSet::load(&tracker_path, config.tracker.retention)?;

    let notes_dir = args.resolve_notes_dir(&config);
    let source = DirectorySource::new(&notes_dir, args.resolve_name_filter(&config));
    let pipeline = ExtractionPipeline::new(config.extraction.clone());
    let sink: Box<dyn CardSink> = match args.resolve_output(&config) {
        Some(path) => {
            tracing::info!("Writing cards to {}", path.display());
            Box::new(JsonLinesSink::new(path))
        }
        None => Box::new(StdoutSink),
    };

    let options = RunOptions {
        target_name_pattern,
        reference: args.resolve_reference(),
        dry_run: args.dry_run,
    };
    tracing::info!(
        notes_dir = %notes_dir.display(),
        reference = %options.reference,
        dry_run = options.dry_run,
        "Processing run starting"
    );

    let summary = ProcessingRun::new(&source, &pipeline, &PassthroughRewriter, sink.as_ref())
        .execute(&mut tracker, &options)
        .await?;

    if !options.dry_run {
        tracker.save(&tracker_path)?;
    }

    tracing::info!(
        seen = summary.seen,
        skipped = summary.skipped,
        failed = summary.failed,
        processed = summary.processed,
        cards_created = summary.cards_created,
        cards_failed = summary.cards_failed,
        "Minuta finished"
    );
    Ok(())
}
