//! CSV report.
//!
//! One row per target: target, verdict, then one field per step. Rows are as
//! long as their step list, so the writer is flexible.

use std::io::{self, Write};

use csv::WriterBuilder;

use crate::config::CSV_DELIMITER;
use crate::scan::ScanResult;

/// Writes the `Target;Result;Details` header and one row per result.
pub fn write_csv<W: Write>(results: &[ScanResult], sink: &mut W) -> io::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_writer(sink);

    writer.write_record(["Target", "Result", "Details"])?;
    for result in results {
        let mut row = vec![result.target().to_string(), result.verdict_text().to_string()];
        row.extend(result.step_texts());
        writer.write_record(&row)?;
    }
    writer.flush()
}
