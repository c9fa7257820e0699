//! Batch deletion of orphans
//!
//! Ids are deleted one at a time, in the order given. The first id that
//! cannot be deleted stops the batch. Ids deleted before it stay deleted:
//! there is no rollback across the batch.

use crate::entity::{DeletionStrategy, EntityKind};
use crate::error::{OrphanError, Result};
use crate::executor::DeletionProvider;

/// Result of deleting a single id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub id: i64,
    pub succeeded: bool,
}

/// Summary of a deletion batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionReport {
    pub kind: EntityKind,
    pub outcomes: Vec<DeletionOutcome>,
}

impl DeletionReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    /// The id that stopped the batch, if any
    pub fn first_failure(&self) -> Option<i64> {
        self.outcomes.iter().find(|o| !o.succeeded).map(|o| o.id)
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Turn a report with a failure into `DeletionFailed`
    pub fn into_result(self) -> Result<Self> {
        match self.first_failure() {
            Some(id) => Err(OrphanError::DeletionFailed {
                kind: self.kind,
                id,
            }),
            None => Ok(self),
        }
    }
}

impl DeletionStrategy {
    /// Delete one id through the provider
    pub fn apply<D: DeletionProvider + ?Sized>(&self, provider: &D, id: i64) -> Result<bool> {
        match self {
            DeletionStrategy::Metadata(meta_type) => provider.delete_metadata(meta_type, id),
            DeletionStrategy::Comment => provider.delete_comment(id),
            DeletionStrategy::Post => provider.delete_post(id),
            DeletionStrategy::Revision => provider.delete_revision(id),
        }
    }
}

/// Deletes orphans through a borrowed deletion provider
pub struct OrphanDeleter<'a, D: DeletionProvider + ?Sized> {
    provider: &'a D,
}

impl<'a, D: DeletionProvider + ?Sized> OrphanDeleter<'a, D> {
    pub fn new(provider: &'a D) -> Self {
        Self { provider }
    }

    /// Delete ids in order, stopping at the first failure
    ///
    /// The returned report ends with the failing id when one failed.
    pub fn run(&self, kind: EntityKind, ids: &[i64]) -> DeletionReport {
        let strategy = kind.deletion_strategy();
        let mut outcomes = Vec::with_capacity(ids.len());

        for &id in ids {
            let succeeded = match strategy.apply(self.provider, id) {
                Ok(deleted) => deleted,
                Err(e) => {
                    tracing::warn!("Deleting {} {} failed: {}", kind, id, e);
                    false
                }
            };
            tracing::debug!("Deleted {} {}: {}", kind, id, succeeded);

            outcomes.push(DeletionOutcome { id, succeeded });
            if !succeeded {
                break;
            }
        }

        let report = DeletionReport { kind, outcomes };
        tracing::info!(
            "Deleted {}/{} {} orphan(s)",
            report.succeeded(),
            ids.len(),
            kind
        );
        report
    }

    /// Delete every id, failing with `DeletionFailed` on the first failure
    ///
    /// An empty id list is a successful no-op.
    pub fn delete_all(&self, kind: EntityKind, ids: &[i64]) -> Result<DeletionReport> {
        self.run(kind, ids).into_result()
    }
}
