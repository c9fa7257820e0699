//! Row deletion with WordPress semantics
//!
//! Each call deletes one entity together with the rows WordPress itself
//! would remove alongside it, inside a single transaction.

use super::Database;
use crate::entity::REVISION_POST_TYPE;
use crate::error::{OrphanError, Result};
use crate::executor::DeletionProvider;
use rusqlite::{params, Connection, OptionalExtension};

const META_TYPES: [&str; 5] = ["blog", "comment", "post", "term", "user"];

impl Database {
    fn delete_comment_rows(&self, conn: &Connection, id: i64) -> Result<bool> {
        let comments = self.table("comments");

        let found: Option<(i64, i64)> = conn
            .query_row(
                &format!(
                    "SELECT comment_parent, comment_post_ID FROM {} WHERE comment_ID = ?1",
                    comments
                ),
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((parent, post_id)) = found else {
            return Ok(false);
        };

        conn.execute(
            &format!(
                "UPDATE {} SET comment_parent = ?1 WHERE comment_parent = ?2",
                comments
            ),
            params![parent, id],
        )?;
        conn.execute(
            &format!("DELETE FROM {} WHERE comment_id = ?1", self.table("commentmeta")),
            params![id],
        )?;
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE comment_ID = ?1", comments),
            params![id],
        )?;

        if post_id != 0 {
            conn.execute(
                &format!(
                    "UPDATE {posts} SET comment_count = (
                         SELECT COUNT(*) FROM {comments}
                         WHERE comment_post_ID = ?1 AND comment_approved = '1'
                     )
                     WHERE ID = ?1",
                    posts = self.table("posts"),
                    comments = comments,
                ),
                params![post_id],
            )?;
        }

        Ok(deleted > 0)
    }

    fn delete_post_rows(&self, conn: &Connection, id: i64) -> Result<bool> {
        let posts = self.table("posts");

        let parent: Option<i64> = conn
            .query_row(
                &format!("SELECT post_parent FROM {} WHERE ID = ?1", posts),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(parent) = parent else {
            return Ok(false);
        };

        // Children move up a level; revisions go with their post.
        conn.execute(
            &format!(
                "UPDATE {} SET post_parent = ?1 WHERE post_parent = ?2 AND post_type != ?3",
                posts
            ),
            params![parent, id, REVISION_POST_TYPE],
        )?;

        let revisions: Vec<i64> = {
            let mut stmt = conn.prepare(&format!(
                "SELECT ID FROM {} WHERE post_parent = ?1 AND post_type = ?2",
                posts
            ))?;
            let ids = stmt.query_map(params![id, REVISION_POST_TYPE], |row| row.get(0))?;
            ids.collect::<rusqlite::Result<_>>()?
        };
        for revision in revisions {
            self.delete_post_rows(conn, revision)?;
        }

        let comment_ids: Vec<i64> = {
            let mut stmt = conn.prepare(&format!(
                "SELECT comment_ID FROM {} WHERE comment_post_ID = ?1",
                self.table("comments")
            ))?;
            let ids = stmt.query_map(params![id], |row| row.get(0))?;
            ids.collect::<rusqlite::Result<_>>()?
        };
        for comment in comment_ids {
            conn.execute(
                &format!("DELETE FROM {} WHERE comment_id = ?1", self.table("commentmeta")),
                params![comment],
            )?;
        }
        conn.execute(
            &format!("DELETE FROM {} WHERE comment_post_ID = ?1", self.table("comments")),
            params![id],
        )?;

        conn.execute(
            &format!("DELETE FROM {} WHERE post_id = ?1", self.table("postmeta")),
            params![id],
        )?;
        conn.execute(
            &format!(
                "DELETE FROM {} WHERE object_id = ?1",
                self.table("term_relationships")
            ),
            params![id],
        )?;
        let deleted = conn.execute(&format!("DELETE FROM {} WHERE ID = ?1", posts), params![id])?;

        Ok(deleted > 0)
    }

    fn is_revision(&self, id: i64) -> Result<bool> {
        let post_type: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT post_type FROM {} WHERE ID = ?1", self.table("posts")),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(post_type.as_deref() == Some(REVISION_POST_TYPE))
    }
}

impl DeletionProvider for Database {
    fn delete_metadata(&self, meta_type: &str, id: i64) -> Result<bool> {
        if !META_TYPES.contains(&meta_type) {
            return Err(OrphanError::InvalidInput(format!(
                "Unknown meta type: {}",
                meta_type
            )));
        }
        let id_column = if meta_type == "user" { "umeta_id" } else { "meta_id" };

        let deleted = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1",
                self.table(&format!("{}meta", meta_type)),
                id_column
            ),
            params![id],
        )?;
        Ok(deleted > 0)
    }

    fn delete_comment(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let deleted = self.delete_comment_rows(&tx, id)?;
        tx.commit()?;
        Ok(deleted)
    }

    fn delete_post(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let deleted = self.delete_post_rows(&tx, id)?;
        tx.commit()?;
        Ok(deleted)
    }

    fn delete_revision(&self, id: i64) -> Result<bool> {
        if !self.is_revision(id)? {
            return Ok(false);
        }
        self.delete_post(id)
    }
}
