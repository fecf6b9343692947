//! Batch driver: expands target descriptors and scans them in order.

use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::{CSV_DELIMITER, WWW_PREFIX};
use crate::dns::Resolver;
use crate::error_handling::ScanError;
use crate::scan::result::ScanResult;
use crate::scan::target::Scanner;

/// Where targets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// A `;`-separated CSV file; the first record is a header
    CsvFile(PathBuf),
    /// A single host, host:port or URL
    Target(String),
}

impl TargetSource {
    /// Classifies a descriptor: an existing file is a CSV source, anything else a target.
    pub fn from_descriptor(descriptor: &str) -> Self {
        let path = Path::new(descriptor);
        if path.is_file() {
            TargetSource::CsvFile(path.to_path_buf())
        } else {
            TargetSource::Target(descriptor.to_string())
        }
    }
}

/// Reads the targets of a CSV source.
///
/// The header record is skipped and only the first field of each further
/// record is used. Other fields may hold arbitrary bytes. Records whose first
/// field is empty or not UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns `ScanError::Source` if the file cannot be read and `ScanError::Csv`
/// (with the line number) if a record cannot be parsed.
pub async fn read_csv_targets(path: &Path) -> Result<Vec<String>, ScanError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| ScanError::Source {
            path: path.to_path_buf(),
            source,
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut targets = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| {
            let line = source.position().map(|pos| pos.line()).unwrap_or(0);
            ScanError::Csv {
                path: path.to_path_buf(),
                line,
                source,
            }
        })?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        match record.get(0).map(std::str::from_utf8) {
            Some(Ok(target)) if !target.trim().is_empty() => {
                targets.push(target.trim().to_string());
            }
            Some(Err(e)) => {
                warn!("Skipping {} line {line}: target is not UTF-8 ({e})", path.display());
            }
            _ => warn!("Skipping {} line {line}: no target", path.display()),
        }
    }
    Ok(targets)
}

/// Scans every descriptor in order and collects the results.
///
/// CSV rows are scanned as given and, with `with_www`, immediately followed by
/// their `www.` variant. Processing is strictly sequential.
///
/// # Errors
///
/// Stops at the first fatal error: a broken CSV source, an unsupported resolver
/// status, or cancellation (`ScanError::Interrupted`). Results gathered so far
/// are dropped.
pub async fn run_batch<R: Resolver>(
    scanner: &Scanner<R>,
    descriptors: &[String],
    with_www: bool,
    cancel: &CancellationToken,
) -> Result<Vec<ScanResult>, ScanError> {
    let mut results = Vec::new();
    for descriptor in descriptors {
        match TargetSource::from_descriptor(descriptor) {
            TargetSource::CsvFile(path) => {
                let targets = read_csv_targets(&path).await?;
                info!("Read {} targets from {}", targets.len(), path.display());
                for target in &targets {
                    results.push(scan_one(scanner, target, None, cancel).await?);
                    if with_www {
                        results.push(scan_one(scanner, target, Some(WWW_PREFIX), cancel).await?);
                    }
                }
            }
            TargetSource::Target(target) => {
                results.push(scan_one(scanner, &target, None, cancel).await?);
            }
        }
    }
    Ok(results)
}

async fn scan_one<R: Resolver>(
    scanner: &Scanner<R>,
    target: &str,
    prefix: Option<&str>,
    cancel: &CancellationToken,
) -> Result<ScanResult, ScanError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScanError::Interrupted),
        result = scanner.process_target(target, prefix) => result,
    }
}
