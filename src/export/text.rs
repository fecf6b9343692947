//! Plain text report.

use std::io::{self, Write};

use crate::scan::ScanResult;

/// Writes each result as `<target> <OK|BAD>` followed by its steps, one per line.
pub fn write_text<W: Write>(results: &[ScanResult], sink: &mut W) -> io::Result<()> {
    for result in results {
        writeln!(sink, "{result}")?;
    }
    sink.flush()
}
