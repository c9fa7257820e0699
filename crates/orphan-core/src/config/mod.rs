//! Configuration management

use crate::error::{OrphanError, Result};
use crate::query::{validate_table_prefix, QueryBuilder, DEFAULT_TABLE_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file of the WordPress install
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Table prefix, e.g. `wp_` or `wp_2_` for a sub-site
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            table_prefix: default_table_prefix(),
        }
    }
}

const NO_DATABASE: &str =
    "No database configured; pass --db, set ORPHAN_DB or add `database:` to the config file";

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from a path, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path (`ORPHAN_CONFIG` overrides it)
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("ORPHAN_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Apply command-line (or environment) overrides on top of the file
    pub fn with_overrides(
        mut self,
        database: Option<PathBuf>,
        table_prefix: Option<String>,
    ) -> Self {
        if database.is_some() {
            self.database = database;
        }
        if let Some(prefix) = table_prefix {
            self.table_prefix = prefix;
        }
        self
    }

    /// Database path, required for anything that touches the database
    pub fn database_path(&self) -> Result<&Path> {
        self.database
            .as_deref()
            .ok_or_else(|| OrphanError::Config(NO_DATABASE.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        validate_table_prefix(&self.table_prefix)
    }

    pub fn query_builder(&self) -> Result<QueryBuilder> {
        QueryBuilder::new(&self.table_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.yml")).unwrap();
        assert_eq!(config.table_prefix, "wp_");
        assert!(config.database.is_none());
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "database: /var/lib/wp.sqlite\ntable_prefix: wp_3_\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/var/lib/wp.sqlite")));
        assert_eq!(config.table_prefix, "wp_3_");
        assert_eq!(config.query_builder().unwrap().table("posts"), "wp_3_posts");
    }

    #[test]
    fn test_overrides_win() {
        let config = Config {
            database: Some(PathBuf::from("a.sqlite")),
            table_prefix: "wp_".into(),
        }
        .with_overrides(Some(PathBuf::from("b.sqlite")), Some("blog_".into()));

        assert_eq!(config.database_path().unwrap(), Path::new("b.sqlite"));
        assert_eq!(config.table_prefix, "blog_");

        let kept = Config::default().with_overrides(None, None);
        assert_eq!(kept.table_prefix, "wp_");
    }

    #[test]
    fn test_missing_database_is_config_error() {
        let err = Config::default().database_path().unwrap_err();
        assert!(matches!(err, OrphanError::Config(_)));
    }

    #[test]
    fn test_invalid_prefix_fails_validation() {
        let config = Config::default().with_overrides(None, Some("wp-".into()));
        assert!(config.validate().is_err());
    }
}
