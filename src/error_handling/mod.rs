//! Error handling.
//!
//! This module provides the error types of the scanner:
//! - `InitializationError`: logger or HTTP client setup failed
//! - `ScanError`: fatal, run-level failures (unsupported resolver status, broken
//!   CSV source, report I/O, interruption)
//!
//! Everything that goes wrong with an individual target (DNS negative answers,
//! HTTP errors, bad redirects) is recorded in that target's `ScanResult` instead.

mod types;

// Re-export public API
pub use types::{InitializationError, ScanError};
