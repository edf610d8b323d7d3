//! Keyword index types and index file loading.

pub mod script;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a keyword index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Index not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read index: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse index: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse keyword script at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("Entry {position} has an empty tag")]
    EmptyTag { position: usize },

    #[error("Entry {position} has a tag containing whitespace: '{tag}'")]
    InvalidTag { position: usize, tag: String },

    #[error("Duplicate tag: '{0}'")]
    DuplicateTag(String),
}

/// One searchable documentation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, also the stem of the navigation target.
    pub tag: String,
    /// Display text rendered in the result list.
    pub title: String,
    /// Auxiliary searchable text (section headings, index words).
    #[serde(default)]
    pub other: String,
}

impl Entry {
    #[must_use]
    pub fn new(tag: impl Into<String>, title: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            title: title.into(),
            other: other.into(),
        }
    }
}

/// On-disk JSON layout of a keyword index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexFile {
    pub version: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// An immutable, ordered sequence of entries.
///
/// Entry order is the result order of every search and is never changed.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<Entry>,
}

impl KeywordIndex {
    /// Build an index, checking that every tag is non-empty, free of
    /// whitespace, and unique.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::EmptyTag`, `IndexError::InvalidTag`, or
    /// `IndexError::DuplicateTag` for the first offending entry.
    pub fn new(entries: Vec<Entry>) -> Result<Self, IndexError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.tag.is_empty() {
                return Err(IndexError::EmptyTag { position });
            }
            if entry.tag.chars().any(char::is_whitespace) {
                return Err(IndexError::InvalidTag {
                    position,
                    tag: entry.tag.clone(),
                });
            }
            if !seen.insert(entry.tag.as_str()) {
                return Err(IndexError::DuplicateTag(entry.tag.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Load an index file, choosing the format from the extension.
    ///
    /// `.js` files are read as a legacy keyword script, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NotFound` if the file doesn't exist, a read or
    /// parse error if it can't be decoded, or a tag validation error.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let index = if is_script(path) {
            Self::new(script::parse(&contents)?)?
        } else {
            Self::from_json(&contents)?
        };

        tracing::info!(path = %path.display(), entries = index.len(), "keyword index loaded");
        Ok(index)
    }

    /// Parse the JSON index layout.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::ParseError` for invalid JSON, or a tag
    /// validation error.
    pub fn from_json(contents: &str) -> Result<Self, IndexError> {
        let file: IndexFile = serde_json::from_str(contents)?;
        Self::new(file.entries)
    }

    /// Serialize to the JSON index layout.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, IndexError> {
        let file = IndexFile {
            version: "1".to_string(),
            entries: self.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
}
