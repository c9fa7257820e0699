//! Collaborator interfaces for query execution and row deletion
//!
//! The finder and deleter never talk to a database directly. They borrow a
//! [`QueryExecutor`] or [`DeletionProvider`], which [`crate::Database`]
//! implements for SQLite and tests replace with in-memory fakes.

use crate::error::Result;
use crate::query::OrphanQuery;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Coerce to an integer id, accepting numeric text
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Real(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// A result row with columns in query order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    /// Look up a column by name, ignoring ASCII case
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Runs read queries against the host database
pub trait QueryExecutor {
    /// Run a query and return every row
    fn run_query(&self, query: &OrphanQuery) -> Result<Vec<Row>>;

    /// Run a query and return its first column only
    fn run_scalar_column(&self, query: &OrphanQuery) -> Result<Vec<Value>>;
}

/// Deletes single rows through the host's own deletion primitives
///
/// `Ok(false)` means the host refused or found nothing to delete.
pub trait DeletionProvider {
    fn delete_metadata(&self, meta_type: &str, id: i64) -> Result<bool>;

    fn delete_comment(&self, id: i64) -> Result<bool>;

    fn delete_post(&self, id: i64) -> Result<bool>;

    fn delete_revision(&self, id: i64) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_as_i64() {
        assert_eq!(Value::Integer(4).as_i64(), Some(4));
        assert_eq!(Value::Text(" 15 ".into()).as_i64(), Some(15));
        assert_eq!(Value::Real(3.0).as_i64(), Some(3));
        assert_eq!(Value::Real(3.5).as_i64(), None);
        assert_eq!(Value::Text("abc".into()).as_i64(), None);
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn test_row_get_ignores_case() {
        let row = Row::new().with("comment_ID", Value::Integer(7));
        assert_eq!(row.get("comment_id"), Some(&Value::Integer(7)));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let row = Row::new()
            .with("meta_id", Value::Integer(4))
            .with("meta_key", Value::Text("_edit_lock".into()))
            .with("extra", Value::Null);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"meta_id":4,"meta_key":"_edit_lock","extra":null}"#);
    }
}
