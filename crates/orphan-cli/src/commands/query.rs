//! Query command

use super::OrphanOptions;
use anyhow::Result;
use orphan_core::Config;

/// Print the orphan query; the database is never opened
pub fn run(options: &OrphanOptions, config: &Config) -> Result<()> {
    let query = config
        .query_builder()?
        .build(options.kind.descriptor(), &options.types);

    println!("{}", query.to_inline_sql());
    Ok(())
}
