//! JSON output formatter

use anyhow::Result;
use orphan_core::Row;

pub fn format_rows(rows: &[Row]) -> Result<String> {
    Ok(serde_json::to_string(rows)? + "\n")
}
