//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using gumdrop,
//! covering the configuration path and the runtime overrides.

use gumdrop::Options;
use std::path::PathBuf;

/// Soilwatch: terminal dashboard for the plant telemetry server
#[derive(Debug, Default, Options)]
pub struct Cli {
    /// Print the help message and exit
    #[options(help = "print help message")]
    pub help: bool,

    /// Path to the configuration file
    #[options(short = "c", meta = "PATH", help = "path to configuration file")]
    pub config: Option<PathBuf>,

    /// Telemetry server base URL (overrides config file)
    #[options(short = "s", meta = "URL", help = "telemetry server base URL")]
    pub server: Option<String>,

    /// History window in hours (overrides config file)
    #[options(short = "w", meta = "HOURS", help = "history window in hours, 1-168")]
    pub hours: Option<u32>,

    /// Refresh interval in seconds (overrides config file)
    #[options(short = "i", meta = "SECS", help = "refresh interval in seconds")]
    pub refresh_secs: Option<u64>,

    /// Log filter, e.g. "info" or "soilwatch=debug" (overrides config file)
    #[options(short = "l", meta = "FILTER", help = "log filter, e.g. info or soilwatch=debug")]
    pub log_level: Option<String>,

    /// Log destination file (overrides config file)
    #[options(no_short, meta = "PATH", help = "write logs to this file")]
    pub log_file: Option<String>,
}

impl Cli {
    /// Parse command-line arguments, printing usage and exiting on --help
    pub fn parse_args() -> Self {
        Self::parse_args_default_or_exit()
    }
}
