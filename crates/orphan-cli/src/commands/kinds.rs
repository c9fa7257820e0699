//! Kinds command

use crate::output::table;
use anyhow::Result;
use orphan_core::EntityKind;

pub fn run() -> Result<()> {
    let headers = [
        "kind",
        "table",
        "id",
        "reference",
        "parent_table",
        "parent_id",
        "type",
    ];

    let rows: Vec<Vec<String>> = EntityKind::ALL
        .iter()
        .map(|kind| {
            let d = kind.descriptor();
            let type_column = match (d.type_column, d.fixed_type) {
                (Some(column), Some(fixed)) => format!("{} = {}", column, fixed),
                (Some(column), None) => column.to_string(),
                _ => String::new(),
            };
            vec![
                kind.name().to_string(),
                d.table.to_string(),
                d.id_column.to_string(),
                d.ref_column.to_string(),
                d.parent_table.to_string(),
                d.parent_id_column.to_string(),
                type_column,
            ]
        })
        .collect();

    print!("{}", table::format_table(&headers, &rows));
    Ok(())
}
