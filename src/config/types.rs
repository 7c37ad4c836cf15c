//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_USER_AGENT, FALLBACK_TIMEOUT, MAX_REDIRECT_HOPS, PROBE_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How scan results are written to stdout in batch mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned, colored line per URL
    Table,
    /// One JSON object per line (the scan response shape plus the input)
    Json,
}

/// Library configuration, also parsed from the command line by the binary.
///
/// # Examples
///
/// ```no_run
/// use redirect_checker::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("urls.txt"),
///     max_hops: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "redirect_checker",
    version,
    about = "Resolve URLs through their redirect chains and classify the outcome"
)]
pub struct Config {
    /// File to read URLs from, one per line (`-` reads stdin)
    #[arg(default_value = "-")]
    pub file: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Result output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Maximum number of probe iterations per URL
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_hops: usize,

    /// Deadline for the HEAD probe in milliseconds
    #[arg(long, default_value_t = PROBE_TIMEOUT.as_millis() as u64)]
    pub probe_timeout_ms: u64,

    /// Deadline for the GET fallback in milliseconds
    #[arg(long, default_value_t = FALLBACK_TIMEOUT.as_millis() as u64)]
    pub fallback_timeout_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Serve the scan API on this port instead of running a batch
    #[arg(long)]
    pub serve_port: Option<u16>,
}

impl Config {
    /// Probe deadline as a `Duration`.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Fallback deadline as a `Duration`.
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("-"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Table,
            max_hops: MAX_REDIRECT_HOPS,
            probe_timeout_ms: PROBE_TIMEOUT.as_millis() as u64,
            fallback_timeout_ms: FALLBACK_TIMEOUT.as_millis() as u64,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            serve_port: None,
        }
    }
}
