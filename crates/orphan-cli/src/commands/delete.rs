//! Delete command

use super::{open_database, OrphanOptions};
use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use orphan_core::{Config, OrphanDeleter, OrphanFinder, OrphanRecord};

pub fn run(options: &OrphanOptions, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let finder = OrphanFinder::new(&db, config.query_builder()?);

    let ids = finder.find_ids(options.kind, &options.types)?;
    if ids.is_empty() {
        println!("Success: No orphans found.");
        return Ok(());
    }

    let records: Vec<OrphanRecord> = ids.iter().copied().map(OrphanRecord::Id).collect();
    print!(
        "{}",
        output::render(
            OutputFormat::Ids,
            &records,
            options.kind.descriptor().id_column
        )?
    );

    println!();
    println!("{}", deleting_message(ids.len()));

    OrphanDeleter::new(&db).delete_all(options.kind, &ids)?;

    println!("Success: Done.");
    Ok(())
}

fn deleting_message(count: usize) -> String {
    if count == 1 {
        "Deleting 1 item...".to_string()
    } else {
        format!("Deleting {} items...", count)
    }
}
