//! Configuration loading for docsearch.

use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use thiserror::Error;

use crate::navigate::NavigationConfig;
use crate::search::{DEFAULT_MAX_LIST, MatchMode, SearchOptions};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOCSEARCH_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Where the keyword index lives.
#[derive(Debug, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_index_path")]
    pub path: String,
}

/// Search tunables.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results rendered per query.
    #[serde(default = "default_max_list")]
    pub max_list: usize,
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_index_path() -> String {
    "_search.json".to_string()
}

fn default_max_list() -> usize {
    DEFAULT_MAX_LIST
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_list: default_max_list(),
            match_mode: MatchMode::default(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            max_list: self.max_list,
            mode: self.match_mode,
        }
    }
}

impl Config {
    /// Load config from `$DOCSEARCH_CONFIG` or the platform config
    /// directory, or return defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::ParseError { source, .. } => ConfigError::ParseError { path, source },
            other => other,
        })?;

        Ok(config)
    }

    /// Parse and validate config text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for invalid TOML and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::ParseError {
            path: PathBuf::new(),
            source,
        })?;

        if config.search.max_list == 0 {
            return Err(ConfigError::Invalid(
                "search.max_list must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "docsearch").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The configured index path with `~` expanded.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        expand_tilde(&self.index.path)
    }
}

/// Expand ~ to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigate::Frame;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.index.path, "_search.json");
        assert_eq!(config.search.max_list, 100);
        assert_eq!(config.search.match_mode, MatchMode::Pattern);
        assert_eq!(config.navigation.suffix, ".htm");
        assert_eq!(config.navigation.frame, Frame::Parent);
    }

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
[index]
path = "doc/_search.htm.js"

[search]
max_list = 25
match_mode = "literal"

[navigation]
base = "doc/"
suffix = ".html"
frame = "current"
"#,
        )
        .unwrap();

        assert_eq!(config.index_path(), PathBuf::from("doc/_search.htm.js"));
        assert_eq!(
            config.search.options(),
            SearchOptions {
                max_list: 25,
                mode: MatchMode::Literal
            }
        );
        assert_eq!(config.navigation.base, "doc/");
        assert_eq!(config.navigation.frame, Frame::Current);
    }

    #[test]
    fn zero_max_list_is_rejected() {
        let err = Config::from_toml("[search]\nmax_list = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_list"));
    }

    #[test]
    fn unknown_match_mode_is_rejected() {
        assert!(Config::from_toml("[search]\nmatch_mode = \"fuzzy\"\n").is_err());
    }

    #[test]
    fn tilde_expansion_leaves_relative_paths() {
        assert_eq!(expand_tilde("docs/_search.json"), PathBuf::from("docs/_search.json"));
    }
}
