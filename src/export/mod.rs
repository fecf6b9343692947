//! Report formatters.
//!
//! Every writer takes an explicit `std::io::Write` sink:
//! - Plain text: one block per target
//! - CSV: `;`-separated rows behind a `Target;Result;Details` header
//! - HTML: a standalone page with a results table

mod csv;
mod html;
mod text;

use std::io::{self, Write};

use crate::config::ReportFormat;
use crate::scan::ScanResult;

pub use self::csv::write_csv;
pub use html::write_html;
pub use text::write_text;

/// Writes `results` to `sink` in the given format.
///
/// # Errors
///
/// Returns any I/O error raised by the sink.
pub fn write_report<W: Write>(
    format: ReportFormat,
    results: &[ScanResult],
    sink: &mut W,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(results, sink),
        ReportFormat::Csv => write_csv(results, sink),
        ReportFormat::Html => write_html(results, sink),
    }
}
