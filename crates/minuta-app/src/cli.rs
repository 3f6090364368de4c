//! CLI argument definitions for the Minuta application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use minuta_core::config::MinutaConfig;

/// Minuta: turns meeting notes into action-item cards for one person.
#[derive(Parser, Debug)]
#[command(name = "minuta", version, about)]
pub struct CliArgs {
    /// Directory of meeting-notes files. Overrides `source.notes_dir`.
    pub notes_dir: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Target name pattern (regex fragment, e.g. "Filipe|Felipe").
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Reference date for relative due dates (YYYY-MM-DD). Defaults to today.
    #[arg(long = "today")]
    pub today: Option<NaiveDate>,

    /// JSON-lines file cards are appended to. Overrides `sink.output`.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print cards to stdout and leave the processed set untouched.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Process every notes file, ignoring `source.name_contains`.
    #[arg(long = "all")]
    pub all: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > MINUTA_CONFIG env var > ~/.minuta/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("MINUTA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the target name pattern.
    ///
    /// Priority: --name flag > MINUTA_NAME env var > config file value.
    pub fn resolve_name_pattern(&self, config: &MinutaConfig) -> String {
        if let Some(ref n) = self.name {
            return n.clone();
        }
        if let Ok(n) = std::env::var("MINUTA_NAME") {
            return n;
        }
        config.extraction.target_name_pattern.clone()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the reference date: --today flag > local calendar date.
    pub fn resolve_reference(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Resolve the notes directory: positional argument > config file value.
    pub fn resolve_notes_dir(&self, config: &MinutaConfig) -> PathBuf {
        self.notes_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.source.notes_dir))
    }

    /// Resolve the card output file.
    ///
    /// Returns `None` for stdout: always on --dry-run, otherwise when neither
    /// --output nor `sink.output` is set.
    pub fn resolve_output(&self, config: &MinutaConfig) -> Option<PathBuf> {
        if self.dry_run {
            return None;
        }
        if let Some(ref o) = self.output {
            return Some(o.clone());
        }
        if config.sink.output.is_empty() {
            None
        } else {
            Some(PathBuf::from(&config.sink.output))
        }
    }

    /// Document name filter, or `None` when disabled by --all or an empty
    /// config value.
    pub fn resolve_name_filter(&self, config: &MinutaConfig) -> Option<String> {
        if self.all || config.source.name_contains.is_empty() {
            None
        } else {
            Some(config.source.name_contains.clone())
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".minuta").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".minuta").join("config.toml");
    }
    PathBuf::from("config.toml")
}
