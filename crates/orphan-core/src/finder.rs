//! Orphan lookup

use crate::entity::EntityKind;
use crate::error::{OrphanError, Result};
use crate::executor::{QueryExecutor, Row, Value};
use crate::query::{OrphanQuery, QueryBuilder};

/// What the caller wants back from a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Only the id column, coerced to integers
    Ids,
    /// Full rows as returned by the executor
    Rows,
}

/// A single orphan, either as a bare id or a full row
#[derive(Debug, Clone, PartialEq)]
pub enum OrphanRecord {
    Id(i64),
    Row(Row),
}

impl OrphanRecord {
    /// The record's id, reading `id_column` from full rows
    pub fn id(&self, id_column: &str) -> Option<i64> {
        match self {
            OrphanRecord::Id(id) => Some(*id),
            OrphanRecord::Row(row) => row.get(id_column).and_then(Value::as_i64),
        }
    }
}

/// Finds orphans of any kind through a borrowed executor
pub struct OrphanFinder<'a, E: QueryExecutor + ?Sized> {
    executor: &'a E,
    builder: QueryBuilder,
}

impl<'a, E: QueryExecutor + ?Sized> OrphanFinder<'a, E> {
    pub fn new(executor: &'a E, builder: QueryBuilder) -> Self {
        Self { executor, builder }
    }

    /// Build the query for a kind without running it
    pub fn query(&self, kind: EntityKind, type_filter: &[String]) -> OrphanQuery {
        self.builder.build(kind.descriptor(), type_filter)
    }

    /// Find orphans of a kind
    ///
    /// Executor errors are returned as is; no partial results are produced.
    /// Row order is whatever the executor returns.
    pub fn find(
        &self,
        kind: EntityKind,
        type_filter: &[String],
        shape: RecordShape,
    ) -> Result<Vec<OrphanRecord>> {
        let query = self.query(kind, type_filter);

        let records: Vec<OrphanRecord> = match shape {
            RecordShape::Ids => self
                .collect_ids(kind, &query)?
                .into_iter()
                .map(OrphanRecord::Id)
                .collect(),
            RecordShape::Rows => self
                .executor
                .run_query(&query)?
                .into_iter()
                .map(OrphanRecord::Row)
                .collect(),
        };

        tracing::debug!("Found {} orphan {} record(s)", records.len(), kind);
        Ok(records)
    }

    /// Find orphan ids of a kind
    pub fn find_ids(&self, kind: EntityKind, type_filter: &[String]) -> Result<Vec<i64>> {
        let query = self.query(kind, type_filter);
        self.collect_ids(kind, &query)
    }

    fn collect_ids(&self, kind: EntityKind, query: &OrphanQuery) -> Result<Vec<i64>> {
        self.executor
            .run_scalar_column(query)?
            .into_iter()
            .map(|value| {
                value.as_i64().ok_or_else(|| {
                    OrphanError::QueryExecution(format!(
                        "non-integer {} value '{}' in {} column",
                        kind,
                        value,
                        kind.descriptor().id_column
                    ))
                })
            })
            .collect()
    }
}
