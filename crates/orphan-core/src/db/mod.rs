//! SQLite-backed collaborators
//!
//! [`Database`] runs orphan queries and performs deletions against a
//! WordPress database stored in SQLite:
//! - bound-parameter query execution
//! - per-entity deletion with WordPress cascade rules
//! - bootstrap of the core tables for fixtures

mod deletion;
mod executor;
mod schema;

pub use schema::Database;
