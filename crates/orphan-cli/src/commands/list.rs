//! List command

use super::{open_database, OrphanOptions};
use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use orphan_core::{Config, OrphanFinder};

pub fn run(options: &OrphanOptions, format: OutputFormat, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let finder = OrphanFinder::new(&db, config.query_builder()?);

    let records = finder.find(options.kind, &options.types, format.record_shape())?;

    print!(
        "{}",
        output::render(format, &records, options.kind.descriptor().id_column)?
    );
    Ok(())
}
