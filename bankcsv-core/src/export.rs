//! CSV export of transaction records.
//!
//! One consistent shape regardless of how many documents went in:
//! `source_file,date,description,amount`, with an empty source column for
//! records that were never stamped.

use anyhow::Result;
use std::io::Write;

use crate::types::TransactionRecord;

/// Write records as CSV. Dates come out as `YYYY-MM-DD`, amounts as plain
/// signed decimals with two places; descriptions containing the delimiter
/// are quoted by the writer.
pub fn write_csv<W: Write>(records: &[TransactionRecord], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["source_file", "date", "description", "amount"])?;
    for rec in records {
        wtr.write_record([
            rec.source_document.as_deref().unwrap_or(""),
            &rec.date.format("%Y-%m-%d").to_string(),
            &rec.description,
            &format!("{:.2}", rec.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
