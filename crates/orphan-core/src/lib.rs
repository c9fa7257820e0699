//! Orphan Command Core Library
//!
//! Finds and deletes orphaned WordPress rows: entities and metadata whose
//! reference column points at a parent row that no longer exists.
//!
//! # Features
//! - Fixed registry of the eight supported entity kinds
//! - Anti-join query builder with bound type filters
//! - Finder and fail-fast deleter over pluggable collaborators
//! - SQLite implementation of both collaborators

pub mod config;
pub mod db;
pub mod deleter;
pub mod entity;
pub mod error;
pub mod executor;
pub mod finder;
pub mod query;

pub use config::Config;
pub use db::Database;
pub use deleter::{DeletionOutcome, DeletionReport, OrphanDeleter};
pub use entity::{resolve, DeletionStrategy, EntityDescriptor, EntityKind};
pub use error::{exit_codes, Error, OrphanError, Result};
pub use executor::{DeletionProvider, QueryExecutor, Row, Value};
pub use finder::{OrphanFinder, OrphanRecord, RecordShape};
pub use query::{parse_type_filter, sanitize_key, OrphanQuery, QueryBuilder};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "orphan-command";
