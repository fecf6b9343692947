//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS, MAX_REDIRECT_HOPS};

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

/// Format of the final report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// One block per target: `<target> <OK|BAD>` followed by indented steps
    Text,
    /// `;`-separated rows with a `Target;Result;Details` header
    Csv,
    /// Standalone HTML page with a results table
    Html,
}

/// Scanner configuration.
///
/// Parsed from the command line by the binary, or built programmatically with
/// `..Default::default()` when the crate is used as a library.
///
/// # Examples
///
/// ```bash
/// # Plain text report for two hosts
/// dns_web_scanner example.com www.example.org
///
/// # CSV input, also checking www.<name>, HTML report into a file
/// dns_web_scanner --with-www --html -o report.html names.csv
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dns_web_scanner",
    version,
    about = "Checks that DNS names or URLs resolve and serve a working web server.",
    long_about = "Read DNS names or URLs from CSV files or the command line. Each name is \
                  checked for a valid DNS response (CNAME or A) and a working web server. \
                  HTTP redirects are followed; (I)FRAME redirects count as an error.\n\n\
                  CSV files are ;-separated and the first line (headers) is skipped. Only \
                  the first field is used and should be a host or URL."
)]
pub struct Config {
    /// Path to CSV file or DNS names or URLs
    #[arg(value_name = "TARGET", required = true, num_args = 1..)]
    pub targets: Vec<String>,

    /// Verbose operation (log every target and its verdict)
    #[arg(short, long)]
    pub verbose: bool,

    /// Create HTML output
    #[arg(short = 'H', long, conflicts_with = "csv")]
    pub html: bool,

    /// Create CSV output
    #[arg(short = 'C', long)]
    pub csv: bool,

    /// Also scan www.TARGET for each target when reading from CSV file
    #[arg(short, long)]
    pub with_www: bool,

    /// Output result to FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP connection timeout per hop in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum redirect hops followed per target
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Config {
    /// Report format selected by `--html` / `--csv`.
    pub fn report_format(&self) -> ReportFormat {
        if self.html {
            ReportFormat::Html
        } else if self.csv {
            ReportFormat::Csv
        } else {
            ReportFormat::Text
        }
    }

    /// Effective log level; `--verbose` never lowers it below `info`.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.verbose {
            level.max(log::LevelFilter::Info)
        } else {
            level
        }
    }

    /// HTTP timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            verbose: false,
            html: false,
            csv: false,
            with_www: false,
            output: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            max_redirects: MAX_REDIRECT_HOPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
