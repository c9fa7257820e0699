//! CLI command handlers

pub mod delete;
pub mod kinds;
pub mod list;
pub mod query;

use crate::app::{OrphanAction, OrphanArgs};
use anyhow::Result;
use orphan_core::{parse_type_filter, Config, Database, EntityKind};

/// Options shared by every orphan operation, resolved once from the flags
pub struct OrphanOptions {
    pub kind: EntityKind,
    pub types: Vec<String>,
}

impl OrphanOptions {
    pub fn resolve(kind: EntityKind, raw_types: Option<&str>) -> Self {
        let mut types = raw_types.map(parse_type_filter).unwrap_or_default();

        if !types.is_empty() && !kind.descriptor().accepts_type_filter() {
            tracing::warn!("--type is not supported for {} and will be ignored", kind);
            types.clear();
        }

        Self { kind, types }
    }
}

pub fn run(args: OrphanArgs, config: &Config) -> Result<()> {
    match args.action {
        OrphanAction::List { format, types } => {
            let options = OrphanOptions::resolve(args.kind, types.as_deref());
            list::run(&options, format, config)
        }
        OrphanAction::Delete { types } => {
            let options = OrphanOptions::resolve(args.kind, types.as_deref());
            delete::run(&options, config)
        }
        OrphanAction::Query { types } => {
            let options = OrphanOptions::resolve(args.kind, types.as_deref());
            query::run(&options, config)
        }
    }
}

/// Open the configured database for a command that reads or deletes rows
pub(crate) fn open_database(config: &Config) -> Result<Database> {
    let path = config.database_path()?;
    if !path.exists() {
        return Err(orphan_core::OrphanError::Config(format!(
            "Database not found: {}",
            path.display()
        ))
        .into());
    }

    let db = Database::open(path)?.with_prefix(&config.table_prefix)?;
    db.initialize()?;
    Ok(db)
}
