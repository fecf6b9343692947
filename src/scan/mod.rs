//! Target scanning.
//!
//! This module provides:
//! - `ScanResult` / `Step`: the ordered trace and verdict of one target
//! - `Scanner`: canonical URL, DNS check and redirect trace for one target
//! - `run_batch`: sequential processing of target descriptors and CSV sources

mod batch;
mod result;
mod target;

// Re-export public API
pub use batch::{read_csv_targets, run_batch, TargetSource};
pub use result::{ScanResult, Step};
pub use target::{canonical_url, Scanner};

#[cfg(test)]
mod tests;
