//! Entity kinds and their table mappings
//!
//! Every supported kind maps to a fixed [`EntityDescriptor`] describing where
//! its rows live and which parent table their reference column points at.
//! The mapping is WordPress core schema knowledge and never changes at runtime.

use crate::error::{OrphanError, Result};
use std::fmt;
use std::str::FromStr;

/// Post type every revision row carries
pub const REVISION_POST_TYPE: &str = "revision";

/// Kinds of rows that can be orphaned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    BlogMeta,
    Comment,
    CommentMeta,
    Post,
    PostMeta,
    Revision,
    TermMeta,
    UserMeta,
}

/// Table and column mapping for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Primary key of the child table
    pub id_column: &'static str,
    /// Column holding the parent reference
    pub ref_column: &'static str,
    /// Child table, without prefix
    pub table: &'static str,
    /// Parent table, without prefix
    pub parent_table: &'static str,
    /// Primary key of the parent table
    pub parent_id_column: &'static str,
    /// Type discriminator column, if the kind has one
    pub type_column: Option<&'static str>,
    /// Type value always filtered on, replacing any caller-supplied filter
    pub fixed_type: Option<&'static str>,
}

impl EntityDescriptor {
    /// Whether callers may narrow results with their own type filter
    pub fn accepts_type_filter(&self) -> bool {
        self.type_column.is_some() && self.fixed_type.is_none()
    }
}

/// How a single orphan of a given kind gets deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStrategy {
    /// Delete one metadata row of the given meta type ("post", "user", ...)
    Metadata(&'static str),
    Comment,
    Post,
    Revision,
}

const fn meta(
    id_column: &'static str,
    ref_column: &'static str,
    table: &'static str,
    parent_table: &'static str,
    parent_id_column: &'static str,
) -> EntityDescriptor {
    EntityDescriptor {
        id_column,
        ref_column,
        table,
        parent_table,
        parent_id_column,
        type_column: None,
        fixed_type: None,
    }
}

static REGISTRY: [(EntityKind, EntityDescriptor); 8] = [
    (
        EntityKind::BlogMeta,
        meta("meta_id", "blog_id", "blogmeta", "blogs", "blog_id"),
    ),
    (
        EntityKind::Comment,
        EntityDescriptor {
            id_column: "comment_id",
            ref_column: "comment_post_ID",
            table: "comments",
            parent_table: "posts",
            parent_id_column: "ID",
            type_column: Some("comment_type"),
            fixed_type: None,
        },
    ),
    (
        EntityKind::CommentMeta,
        meta("meta_id", "comment_id", "commentmeta", "comments", "comment_ID"),
    ),
    (
        EntityKind::Post,
        EntityDescriptor {
            id_column: "ID",
            ref_column: "post_parent",
            table: "posts",
            parent_table: "posts",
            parent_id_column: "ID",
            type_column: Some("post_type"),
            fixed_type: None,
        },
    ),
    (
        EntityKind::PostMeta,
        meta("meta_id", "post_id", "postmeta", "posts", "ID"),
    ),
    (
        EntityKind::Revision,
        EntityDescriptor {
            id_column: "ID",
            ref_column: "post_parent",
            table: "posts",
            parent_table: "posts",
            parent_id_column: "ID",
            type_column: Some("post_type"),
            fixed_type: Some(REVISION_POST_TYPE),
        },
    ),
    (
        EntityKind::TermMeta,
        meta("meta_id", "term_id", "termmeta", "terms", "term_id"),
    ),
    (
        EntityKind::UserMeta,
        meta("umeta_id", "user_id", "usermeta", "users", "ID"),
    ),
];

impl EntityKind {
    /// All kinds, in registry order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::BlogMeta,
        EntityKind::Comment,
        EntityKind::CommentMeta,
        EntityKind::Post,
        EntityKind::PostMeta,
        EntityKind::Revision,
        EntityKind::TermMeta,
        EntityKind::UserMeta,
    ];

    /// Command-line name, e.g. `post-meta`
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlogMeta => "blog-meta",
            Self::Comment => "comment",
            Self::CommentMeta => "comment-meta",
            Self::Post => "post",
            Self::PostMeta => "post-meta",
            Self::Revision => "revision",
            Self::TermMeta => "term-meta",
            Self::UserMeta => "user-meta",
        }
    }

    /// WordPress entity slug, e.g. `postmeta`
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BlogMeta => "blogmeta",
            Self::Comment => "comment",
            Self::CommentMeta => "commentmeta",
            Self::Post => "post",
            Self::PostMeta => "postmeta",
            Self::Revision => "revision",
            Self::TermMeta => "termmeta",
            Self::UserMeta => "usermeta",
        }
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        // REGISTRY is indexed in the same order as ALL
        &REGISTRY[*self as usize].1
    }

    pub fn deletion_strategy(&self) -> DeletionStrategy {
        match self {
            Self::BlogMeta => DeletionStrategy::Metadata("blog"),
            Self::CommentMeta => DeletionStrategy::Metadata("comment"),
            Self::PostMeta => DeletionStrategy::Metadata("post"),
            Self::TermMeta => DeletionStrategy::Metadata("term"),
            Self::UserMeta => DeletionStrategy::Metadata("user"),
            Self::Comment => DeletionStrategy::Comment,
            Self::Post => DeletionStrategy::Post,
            Self::Revision => DeletionStrategy::Revision,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = OrphanError;

    /// Accepts both `post-meta` and `postmeta` spellings
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || kind.slug() == wanted)
            .ok_or_else(|| OrphanError::UnknownEntityKind(s.to_string()))
    }
}

/// Look up the descriptor for a kind given by name
pub fn resolve(kind: &str) -> Result<&'static EntityDescriptor> {
    kind.parse::<EntityKind>().map(|kind| kind.descriptor())
}
