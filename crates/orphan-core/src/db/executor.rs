//! Query execution against SQLite

use super::Database;
use crate::error::{OrphanError, Result};
use crate::executor::{QueryExecutor, Row, Value};
use crate::query::OrphanQuery;
use rusqlite::params_from_iter;
use rusqlite::types::ValueRef;

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(s) | ValueRef::Blob(s) => {
            Value::Text(String::from_utf8_lossy(s).to_string())
        }
    }
}

fn query_error(e: rusqlite::Error) -> OrphanError {
    OrphanError::QueryExecution(e.to_string())
}

impl Database {
    fn fetch_rows(&self, query: &OrphanQuery) -> rusqlite::Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(query.sql())?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let rows = stmt.query_map(params_from_iter(query.params()), |row| {
            let mut out = Row::new();
            for (i, name) in names.iter().enumerate() {
                out.push(name.clone(), value_from_ref(row.get_ref(i)?));
            }
            Ok(out)
        })?;

        rows.collect()
    }

    fn fetch_column(&self, query: &OrphanQuery) -> rusqlite::Result<Vec<Value>> {
        let mut stmt = self.conn.prepare(query.sql())?;
        let values = stmt.query_map(params_from_iter(query.params()), |row| {
            Ok(value_from_ref(row.get_ref(0)?))
        })?;

        values.collect()
    }
}

impl QueryExecutor for Database {
    fn run_query(&self, query: &OrphanQuery) -> Result<Vec<Row>> {
        self.fetch_rows(query).map_err(query_error)
    }

    fn run_scalar_column(&self, query: &OrphanQuery) -> Result<Vec<Value>> {
        self.fetch_column(query).map_err(query_error)
    }
}
