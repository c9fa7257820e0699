//! CSV output formatter

use super::cell;
use anyhow::Result;
use orphan_core::Row;

pub fn format_rows(rows: &[Row], columns: &[&str]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;

    for row in rows {
        writer.write_record(columns.iter().map(|column| cell(row, column)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
