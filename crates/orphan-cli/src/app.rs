//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use orphan_core::{EntityKind, RecordShape};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wp-orphan")]
#[command(
    author,
    version,
    about = "List and delete orphan WordPress entities and metadata"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database of the WordPress install
    #[arg(long, global = true, env = "ORPHAN_DB")]
    pub db: Option<PathBuf>,

    /// Table prefix (default: wp_)
    #[arg(long, global = true, env = "ORPHAN_TABLE_PREFIX")]
    pub prefix: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List, delete or inspect orphans of one entity kind
    Orphan(OrphanArgs),

    /// Show the supported entity kinds and their tables
    Kinds,
}

#[derive(Args)]
pub struct OrphanArgs {
    /// Entity kind: blog-meta, comment, comment-meta, post, post-meta,
    /// revision, term-meta or user-meta
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    #[command(subcommand)]
    pub action: OrphanAction,
}

#[derive(Subcommand)]
pub enum OrphanAction {
    /// List all orphans
    List {
        /// Render output in a particular format
        #[arg(long, value_enum, default_value = "ids")]
        format: OutputFormat,

        /// Comma-separated list of type slugs (comment and post only)
        #[arg(long = "type")]
        types: Option<String>,
    },
    /// Delete all orphans
    Delete {
        /// Comma-separated list of type slugs (comment and post only)
        #[arg(long = "type")]
        types: Option<String>,
    },
    /// Print the orphan query without running it
    Query {
        /// Comma-separated list of type slugs (comment and post only)
        #[arg(long = "type")]
        types: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<EntityKind, String> {
    s.parse().map_err(|e: orphan_core::OrphanError| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Ids,
    Count,
    Csv,
    Json,
    Table,
    Yaml,
}

impl OutputFormat {
    /// Only the `ids` format can do with the bare id column
    pub fn record_shape(self) -> RecordShape {
        match self {
            OutputFormat::Ids => RecordShape::Ids,
            _ => RecordShape::Rows,
        }
    }
}
