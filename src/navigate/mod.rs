//! Navigation to a resolved entry.

use std::io::Write;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by a navigator while performing a navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Failed to navigate to {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Which view a navigation replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// The view hosting the search widget.
    Current,
    /// The enclosing view of the search widget (the usual frameset case).
    #[default]
    Parent,
}

impl Frame {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Parent => "parent",
        }
    }
}

/// How tags become navigation targets.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// Prefix prepended to the tag, e.g. a directory or site root.
    #[serde(default)]
    pub base: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub frame: Frame,
}

fn default_suffix() -> String {
    ".htm".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            suffix: default_suffix(),
            frame: Frame::default(),
        }
    }
}

/// A composed navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub location: String,
    pub frame: Frame,
}

/// Build the target location for a tag.
#[must_use]
pub fn compose_target(tag: &str, config: &NavigationConfig) -> Target {
    Target {
        location: format!("{}{tag}{}", config.base, config.suffix),
        frame: config.frame,
    }
}

/// Performs navigations.
pub trait Navigator {
    /// Navigate to the target. Callers do not retry on failure.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` if the navigation could not be issued.
    fn navigate(&mut self, target: &Target) -> Result<(), NavigationError>;
}

/// Navigator that writes each target location as a line.
pub struct WriterNavigator<W: Write> {
    writer: W,
}

impl<W: Write> WriterNavigator<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Navigator for WriterNavigator<W> {
    fn navigate(&mut self, target: &Target) -> Result<(), NavigationError> {
        writeln!(
            self.writer,
            "Navigate: {} {}",
            target.frame.as_str(),
            target.location
        )
        .and_then(|()| self.writer.flush())
        .map_err(|source| NavigationError::Io {
            location: target.location.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_htm_in_parent() {
        let target = compose_target("bilinear", &NavigationConfig::default());
        assert_eq!(target.location, "bilinear.htm");
        assert_eq!(target.frame, Frame::Parent);
    }

    #[test]
    fn base_and_suffix_are_applied() {
        let config = NavigationConfig {
            base: "https://docs.example.org/".to_string(),
            suffix: ".html".to_string(),
            frame: Frame::Current,
        };
        let target = compose_target("rate_table", &config);
        assert_eq!(target.location, "https://docs.example.org/rate_table.html");
        assert_eq!(target.frame, Frame::Current);
    }

    #[test]
    fn writer_navigator_writes_one_line() {
        let mut navigator = WriterNavigator::new(Vec::new());
        navigator
            .navigate(&compose_target("age_table", &NavigationConfig::default()))
            .unwrap();
        let written = String::from_utf8(navigator.into_inner()).unwrap();
        assert_eq!(written, "Navigate: parent age_table.htm\n");
    }

    #[test]
    fn frame_parses_lowercase() {
        let config: NavigationConfig = toml::from_str("frame = \"current\"").unwrap();
        assert_eq!(config.frame, Frame::Current);
        assert_eq!(config.suffix, ".htm");
    }
}
