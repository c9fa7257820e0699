//! End-to-end orphan lookups and deletions against a SQLite fixture

use orphan_core::{
    Database, DeletionProvider, EntityKind, OrphanDeleter, OrphanError, OrphanFinder,
    OrphanRecord, QueryBuilder, RecordShape, Result,
};
use std::cell::RefCell;
use std::collections::BTreeSet;

fn setup() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    db.create_tables().unwrap();
    db
}

fn orphan_ids(db: &Database, kind: EntityKind, types: &[&str]) -> BTreeSet<i64> {
    let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    OrphanFinder::new(db, QueryBuilder::default())
        .find_ids(kind, &types)
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_orphan_post_scenario() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_posts (ID, post_parent) VALUES (1, 0), (2, 0), (3, 0);
             INSERT INTO wp_posts (ID, post_parent) VALUES (10, 2), (11, 99);",
        )
        .unwrap();

    let finder = OrphanFinder::new(&db, QueryBuilder::default());
    let records = finder.find(EntityKind::Post, &[], RecordShape::Ids).unwrap();

    assert_eq!(records, vec![OrphanRecord::Id(11)]);
}

#[test]
fn test_postmeta_count_then_delete() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_posts (ID) VALUES (1);
             INSERT INTO wp_postmeta (meta_id, post_id) VALUES (4, 20), (8, 21), (9, 1);",
        )
        .unwrap();

    let finder = OrphanFinder::new(&db, QueryBuilder::default());
    let rows = finder
        .find(EntityKind::PostMeta, &[], RecordShape::Rows)
        .unwrap();
    assert_eq!(rows.len(), 2);

    let ids = finder.find_ids(EntityKind::PostMeta, &[]).unwrap();
    let report = OrphanDeleter::new(&db)
        .delete_all(EntityKind::PostMeta, &ids)
        .unwrap();
    assert_eq!(report.succeeded(), 2);

    assert!(orphan_ids(&db, EntityKind::PostMeta, &[]).is_empty());
    let remaining: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM wp_postmeta", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn test_revision_ignores_type_filter() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_posts (ID, post_parent, post_type) VALUES
                 (7, 500, 'revision'),
                 (27, 501, 'revision'),
                 (30, 502, 'page');",
        )
        .unwrap();

    let expected: BTreeSet<i64> = [7, 27].into_iter().collect();
    assert_eq!(orphan_ids(&db, EntityKind::Revision, &[]), expected);
    assert_eq!(orphan_ids(&db, EntityKind::Revision, &["page"]), expected);
}

#[test]
fn test_type_filter_restricts_rows() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_posts (ID, post_parent, post_type) VALUES
                 (19, 500, 'post'),
                 (84, 500, 'page');
             INSERT INTO wp_comments (comment_ID, comment_post_ID, comment_type) VALUES
                 (2, 600, 'reaction'),
                 (5, 600, 'comment');",
        )
        .unwrap();

    assert_eq!(
        orphan_ids(&db, EntityKind::Post, &["page"]),
        [84].into_iter().collect()
    );
    assert_eq!(
        orphan_ids(&db, EntityKind::Comment, &["reaction"]),
        [2].into_iter().collect()
    );
    assert_eq!(orphan_ids(&db, EntityKind::Comment, &[]).len(), 2);
}

#[test]
fn test_unsafe_type_values_never_reach_sql() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_posts (ID, post_parent, post_type) VALUES (19, 500, 'page');",
        )
        .unwrap();

    // Quotes and spaces are stripped, leaving a plain slug
    assert_eq!(
        orphan_ids(&db, EntityKind::Post, &["pa' ge"]),
        [19].into_iter().collect()
    );
    assert!(orphan_ids(&db, EntityKind::Post, &["' OR '1'='1"]).is_empty());
}

#[test]
fn test_zero_and_null_references_are_not_orphans() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute_batch(
            "CREATE TABLE wp_termmeta (
                 meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
                 term_id INTEGER,
                 meta_key TEXT,
                 meta_value TEXT
             );",
        )
        .unwrap();
    db.create_tables().unwrap();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_terms (term_id) VALUES (1);
             INSERT INTO wp_termmeta (meta_id, term_id) VALUES
                 (66, 0),
                 (67, NULL),
                 (68, 1),
                 (69, 404);",
        )
        .unwrap();

    assert_eq!(
        orphan_ids(&db, EntityKind::TermMeta, &[]),
        [69].into_iter().collect()
    );
}

#[test]
fn test_repeated_lookups_agree() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_users (ID) VALUES (1);
             INSERT INTO wp_usermeta (umeta_id, user_id) VALUES (77, 5), (78, 1), (99, 6);",
        )
        .unwrap();

    let first = orphan_ids(&db, EntityKind::UserMeta, &[]);
    let second = orphan_ids(&db, EntityKind::UserMeta, &[]);
    assert_eq!(first, [77, 99].into_iter().collect());
    assert_eq!(first, second);
}

#[test]
fn test_every_kind_runs_against_core_tables() {
    let db = setup();
    let finder = OrphanFinder::new(&db, QueryBuilder::default());

    for kind in EntityKind::ALL {
        let records = finder.find(kind, &[], RecordShape::Rows).unwrap();
        assert!(records.is_empty(), "{kind}");
    }
}

/// Delegates to the database but refuses a single id
struct RefusingProvider<'a> {
    db: &'a Database,
    refuse: i64,
    attempted: RefCell<Vec<i64>>,
}

impl DeletionProvider for RefusingProvider<'_> {
    fn delete_metadata(&self, meta_type: &str, id: i64) -> Result<bool> {
        self.attempted.borrow_mut().push(id);
        if id == self.refuse {
            return Ok(false);
        }
        self.db.delete_metadata(meta_type, id)
    }

    fn delete_comment(&self, id: i64) -> Result<bool> {
        self.db.delete_comment(id)
    }

    fn delete_post(&self, id: i64) -> Result<bool> {
        self.db.delete_post(id)
    }

    fn delete_revision(&self, id: i64) -> Result<bool> {
        self.db.delete_revision(id)
    }
}

#[test]
fn test_fail_fast_keeps_earlier_deletions() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO wp_commentmeta (meta_id, comment_id) VALUES (5, 900), (6, 901), (7, 902);",
        )
        .unwrap();

    let provider = RefusingProvider {
        db: &db,
        refuse: 6,
        attempted: RefCell::new(Vec::new()),
    };
    let err = OrphanDeleter::new(&provider)
        .delete_all(EntityKind::CommentMeta, &[5, 6, 7])
        .unwrap_err();

    assert!(matches!(
        err,
        OrphanError::DeletionFailed {
            kind: EntityKind::CommentMeta,
            id: 6
        }
    ));
    assert_eq!(*provider.attempted.borrow(), vec![5, 6]);
    assert_eq!(
        orphan_ids(&db, EntityKind::CommentMeta, &[]),
        [6, 7].into_iter().collect()
    );
}

#[test]
fn test_deleting_missing_id_fails() {
    let db = setup();
    let err = OrphanDeleter::new(&db)
        .delete_all(EntityKind::Comment, &[31337])
        .unwrap_err();
    assert_eq!(err.to_string(), "Could not delete comment with ID 31337!");
}
