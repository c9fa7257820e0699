//! Database handle and WordPress core tables

use crate::error::Result;
use crate::query::{validate_table_prefix, DEFAULT_TABLE_PREFIX};
use rusqlite::Connection;
use std::path::Path;

/// Handle to a WordPress database stored in SQLite
pub struct Database {
    pub(crate) conn: Connection,
    pub(crate) prefix: String,
}

/// Minimal WordPress core tables touched by orphan lookups and deletions
const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS {prefix}posts (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    post_author INTEGER NOT NULL DEFAULT 0,
    post_title TEXT NOT NULL DEFAULT '',
    post_status TEXT NOT NULL DEFAULT 'publish',
    post_parent INTEGER NOT NULL DEFAULT 0,
    post_type TEXT NOT NULL DEFAULT 'post',
    comment_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS {prefix}postmeta (
    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER NOT NULL DEFAULT 0,
    meta_key TEXT,
    meta_value TEXT
);

CREATE TABLE IF NOT EXISTS {prefix}comments (
    comment_ID INTEGER PRIMARY KEY AUTOINCREMENT,
    comment_post_ID INTEGER NOT NULL DEFAULT 0,
    comment_author TEXT NOT NULL DEFAULT '',
    comment_content TEXT NOT NULL DEFAULT '',
    comment_approved TEXT NOT NULL DEFAULT '1',
    comment_type TEXT NOT NULL DEFAULT 'comment',
    comment_parent INTEGER NOT NULL DEFAULT 0,
    user_id INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS {prefix}commentmeta (
    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
    comment_id INTEGER NOT NULL DEFAULT 0,
    meta_key TEXT,
    meta_value TEXT
);

CREATE TABLE IF NOT EXISTS {prefix}terms (
    term_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    slug TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS {prefix}termmeta (
    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
    term_id INTEGER NOT NULL DEFAULT 0,
    meta_key TEXT,
    meta_value TEXT
);

CREATE TABLE IF NOT EXISTS {prefix}term_relationships (
    object_id INTEGER NOT NULL DEFAULT 0,
    term_taxonomy_id INTEGER NOT NULL DEFAULT 0,
    term_order INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (object_id, term_taxonomy_id)
);

CREATE TABLE IF NOT EXISTS {prefix}users (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    user_login TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS {prefix}usermeta (
    umeta_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL DEFAULT 0,
    meta_key TEXT,
    meta_value TEXT
);

CREATE TABLE IF NOT EXISTS {prefix}blogs (
    blog_id INTEGER PRIMARY KEY AUTOINCREMENT,
    domain TEXT NOT NULL DEFAULT '',
    path TEXT NOT NULL DEFAULT '/'
);

CREATE TABLE IF NOT EXISTS {prefix}blogmeta (
    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
    blog_id INTEGER NOT NULL DEFAULT 0,
    meta_key TEXT,
    meta_value TEXT
);

CREATE INDEX IF NOT EXISTS {prefix}postmeta_post_id ON {prefix}postmeta(post_id);
CREATE INDEX IF NOT EXISTS {prefix}posts_post_parent ON {prefix}posts(post_parent);
CREATE INDEX IF NOT EXISTS {prefix}comments_post_id ON {prefix}comments(comment_post_ID);
CREATE INDEX IF NOT EXISTS {prefix}commentmeta_comment_id ON {prefix}commentmeta(comment_id);
CREATE INDEX IF NOT EXISTS {prefix}termmeta_term_id ON {prefix}termmeta(term_id);
CREATE INDEX IF NOT EXISTS {prefix}usermeta_user_id ON {prefix}usermeta(user_id);
CREATE INDEX IF NOT EXISTS {prefix}blogmeta_blog_id ON {prefix}blogmeta(blog_id);
"#;

impl Database {
    /// Open an existing database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self {
            conn,
            prefix: DEFAULT_TABLE_PREFIX.to_string(),
        })
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            prefix: DEFAULT_TABLE_PREFIX.to_string(),
        })
    }

    /// Use a table prefix other than `wp_`
    pub fn with_prefix(mut self, prefix: &str) -> Result<Self> {
        validate_table_prefix(prefix)?;
        self.prefix = prefix.to_string();
        Ok(self)
    }

    /// Underlying connection, for fixtures and ad-hoc inspection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Set connection PRAGMAs
    pub fn initialize(&self) -> Result<()> {
        // WordPress never declares foreign keys; orphans exist precisely because
        // nothing enforces them.
        self.conn.execute_batch(
            "PRAGMA foreign_keys = OFF;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Create the WordPress core tables used by every entity kind
    ///
    /// Existing tables are left alone.
    pub fn create_tables(&self) -> Result<()> {
        self.conn
            .execute_batch(&CREATE_TABLES.replace("{prefix}", &self.prefix))?;
        Ok(())
    }

    /// Prefixed name of a base table
    pub(crate) fn table(&self, base: &str) -> String {
        format!("{}{}", self.prefix, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(db: &Database, name: &str) -> bool {
        db.conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_create_tables_with_default_prefix() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.create_tables().unwrap();

        for table in ["wp_posts", "wp_postmeta", "wp_usermeta", "wp_blogmeta", "wp_termmeta"] {
            assert!(table_exists(&db, table), "{table}");
        }
    }

    #[test]
    fn test_create_tables_is_repeatable() {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        db.create_tables().unwrap();
    }

    #[test]
    fn test_custom_prefix() {
        let db = Database::open_in_memory()
            .unwrap()
            .with_prefix("wp_2_")
            .unwrap();
        db.create_tables().unwrap();

        assert!(table_exists(&db, "wp_2_comments"));
        assert!(!table_exists(&db, "wp_comments"));
    }

    #[test]
    fn test_rejects_unsafe_prefix() {
        let result = Database::open_in_memory().unwrap().with_prefix("x; --");
        assert!(result.is_err());
    }
}
