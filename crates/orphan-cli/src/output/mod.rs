//! Output formatters
//!
//! Every format projects records onto the kind's id column.

pub mod csv;
pub mod ids;
pub mod json;
pub mod table;
pub mod yaml;

use crate::app::OutputFormat;
use anyhow::Result;
use orphan_core::{OrphanRecord, Row, Value};

/// Render orphan records in the requested format
pub fn render(format: OutputFormat, records: &[OrphanRecord], id_column: &str) -> Result<String> {
    match format {
        OutputFormat::Ids => Ok(ids::format_ids(records, id_column)),
        OutputFormat::Count => Ok(format!("{}\n", records.len())),
        OutputFormat::Csv => csv::format_rows(&project(records, id_column), &[id_column]),
        OutputFormat::Json => json::format_rows(&project(records, id_column)),
        OutputFormat::Yaml => yaml::format_rows(&project(records, id_column)),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = project(records, id_column)
                .iter()
                .map(|row| vec![cell(row, id_column)])
                .collect();
            Ok(table::format_table(&[id_column], &rows))
        }
    }
}

/// Reduce every record to a single-column row keyed by `id_column`
fn project(records: &[OrphanRecord], id_column: &str) -> Vec<Row> {
    records
        .iter()
        .map(|record| {
            let value = match record {
                OrphanRecord::Id(id) => Value::Integer(*id),
                OrphanRecord::Row(row) => row.get(id_column).cloned().unwrap_or(Value::Null),
            };
            Row::new().with(id_column, value)
        })
        .collect()
}

pub(crate) fn cell(row: &Row, column: &str) -> String {
    row.get(column).map(|v| v.to_string()).unwrap_or_default()
}
