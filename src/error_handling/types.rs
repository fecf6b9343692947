//! Error type definitions.
//!
//! Per-target failures are not errors: they are recorded as steps of the
//! target's `ScanResult`. The types here abort a whole run.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Fatal errors that abort a scan run.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The resolver answered with a status the scanner does not know how to judge.
    ///
    /// This points at a resolver/configuration problem rather than a bad target,
    /// so the run stops instead of recording a per-target failure.
    #[error("DNS lookup of \"{host}\" failed with unsupported resolver status: {detail}")]
    UnsupportedResolverStatus {
        /// Host that was queried
        host: String,
        /// Resolver supplied detail of the unsupported status
        detail: String,
    },

    /// A CSV target source could not be parsed.
    #[error("file {}, line {line}: {source}", path.display())]
    Csv {
        /// Path of the CSV source
        path: PathBuf,
        /// Line of the offending record (1-based, 0 if unknown)
        line: u64,
        /// Underlying parser error
        #[source]
        source: csv::Error,
    },

    /// A target source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Source {
        /// Path of the source
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing the report to the output sink failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// Resource setup failed.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The run was interrupted before all targets were processed.
    #[error("scan interrupted")]
    Interrupted,
}
