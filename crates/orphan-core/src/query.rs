//! Anti-join query construction
//!
//! Orphans are rows whose non-zero reference column matches no id in the
//! parent table:
//!
//! ```sql
//! SELECT meta_id
//! FROM wp_postmeta
//! WHERE post_id != 0
//!   AND post_id NOT IN (
//!     SELECT ID
//!     FROM wp_posts
//!   )
//! ```
//!
//! Caller-supplied type filters are bound as parameters. A `NULL` reference
//! never satisfies `!= 0`, so rows without a parent are not orphans.

use crate::entity::EntityDescriptor;
use crate::error::{OrphanError, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Default WordPress table prefix
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

lazy_static! {
    static ref UNSAFE_KEY_CHARS: Regex = Regex::new(r"[^a-z0-9_\-]").unwrap();
    static ref TABLE_PREFIX: Regex = Regex::new(r"^[A-Za-z0-9_]*$").unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(r"\?(\d+)").unwrap();
}

/// Restrict a key to lowercase alphanumerics, underscores and dashes
pub fn sanitize_key(key: &str) -> String {
    UNSAFE_KEY_CHARS
        .replace_all(&key.to_lowercase(), "")
        .into_owned()
}

/// Parse a comma-separated `--type` value into sanitized type slugs
///
/// Blank input means no filter. Pieces that sanitize to an empty string are
/// kept so that they match nothing rather than widening the filter.
pub fn parse_type_filter(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(sanitize_key).collect()
}

/// Check a table prefix before it is spliced into identifiers
pub fn validate_table_prefix(prefix: &str) -> Result<()> {
    if TABLE_PREFIX.is_match(prefix) {
        Ok(())
    } else {
        Err(OrphanError::Config(format!(
            "Invalid table prefix '{}': only letters, digits and underscores are allowed",
            prefix
        )))
    }
}

/// A built orphan query with its bound parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanQuery {
    sql: String,
    params: Vec<String>,
}

impl OrphanQuery {
    /// SQL text with `?N` placeholders
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// SQL text with every parameter rendered as a quoted literal
    pub fn to_inline_sql(&self) -> String {
        PLACEHOLDER
            .replace_all(&self.sql, |caps: &Captures| {
                let value = caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.params.get(i));
                match value {
                    Some(v) => format!("'{}'", v.replace('\'', "''")),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Builds orphan queries against a prefixed set of tables
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    prefix: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }
}

impl QueryBuilder {
    pub fn new(prefix: &str) -> Result<Self> {
        validate_table_prefix(prefix)?;
        Ok(Self {
            prefix: prefix.to_string(),
        })
    }

    /// Prefixed name of a base table
    pub fn table(&self, base: &str) -> String {
        format!("{}{}", self.prefix, base)
    }

    /// Build the orphan query for a descriptor
    ///
    /// The type filter only applies when the descriptor has a type column.
    /// Descriptors with a fixed type ignore the caller's filter entirely.
    pub fn build(&self, descriptor: &EntityDescriptor, type_filter: &[String]) -> OrphanQuery {
        let mut sql = format!(
            concat!(
                "SELECT {id}\n",
                "FROM {table}\n",
                "WHERE {reference} != 0\n",
                "  AND {reference} NOT IN (\n",
                "    SELECT {parent_id}\n",
                "    FROM {parent_table}\n",
                "  )",
            ),
            id = descriptor.id_column,
            table = self.table(descriptor.table),
            reference = descriptor.ref_column,
            parent_id = descriptor.parent_id_column,
            parent_table = self.table(descriptor.parent_table),
        );
        let mut params = Vec::new();

        if let Some(type_column) = descriptor.type_column {
            match descriptor.fixed_type {
                Some(fixed) => {
                    sql.push_str(&format!("\n  AND {} = '{}'", type_column, fixed));
                }
                None if !type_filter.is_empty() => {
                    let placeholders: Vec<String> =
                        (1..=type_filter.len()).map(|i| format!("?{}", i)).collect();
                    sql.push_str(&format!(
                        "\n  AND {} IN ({})",
                        type_column,
                        placeholders.join(", ")
                    ));
                    params.extend(type_filter.iter().map(|t| sanitize_key(t)));
                }
                None => {}
            }
        }

        tracing::debug!("Built orphan query: {}", sql.replace('\n', " "));

        OrphanQuery { sql, params }
    }
}
