//! Command implementations shared by CLI and MCP server.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::QueryArgs;
use crate::config::Config;
use crate::index::{Entry, KeywordIndex, script};
use crate::navigate::{NavigationConfig, Target, compose_target};
use crate::search::{self, LineSelection, ResultList, SearchOptions};
use crate::widget::SearchWidget;

/// Maximum accepted query length, in characters.
const MAX_QUERY_LENGTH: usize = 1000;

/// A loaded index with the effective search and navigation settings.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub index: KeywordIndex,
    pub options: SearchOptions,
    pub navigation: NavigationConfig,
}

impl SearchContext {
    /// Create a widget over this context's index.
    #[must_use]
    pub fn widget(&self) -> SearchWidget {
        SearchWidget::new(self.index.clone(), self.options, self.navigation.clone())
    }
}

/// Load config and index, applying per-invocation overrides.
///
/// # Errors
///
/// Returns an error if the config or index cannot be loaded, or if an
/// override is out of range.
pub fn open(args: &QueryArgs) -> anyhow::Result<SearchContext> {
    let config = Config::load()?;

    let path = args.index.clone().unwrap_or_else(|| config.index_path());
    let index = load_index(&path)?;

    let mut options = config.search.options();
    if let Some(max_list) = args.max_list {
        if max_list == 0 {
            anyhow::bail!("--max-list must be at least 1");
        }
        options.max_list = max_list;
    }
    if let Some(mode) = args.mode {
        options.mode = mode;
    }

    Ok(SearchContext {
        index,
        options,
        navigation: config.navigation,
    })
}

fn load_index(path: &Path) -> anyhow::Result<KeywordIndex> {
    KeywordIndex::load(path).with_context(|| format!("Load {}", path.display()))
}

fn validate_query(query: &str) -> anyhow::Result<()> {
    let length = query.chars().count();
    if length > MAX_QUERY_LENGTH {
        anyhow::bail!("Query too long: {length} chars (max {MAX_QUERY_LENGTH})");
    }
    Ok(())
}

/// Filter the index with a query.
///
/// # Errors
///
/// Returns an error if the query is too long or the index cannot be loaded.
/// A malformed query is not an error; it simply has no matches.
pub fn search(query: &str, args: &QueryArgs) -> anyhow::Result<ResultList> {
    validate_query(query)?;
    let context = open(args)?;
    Ok(search::search(&context.index, query, &context.options))
}

/// List every entry of the index in index order.
///
/// # Errors
///
/// Returns an error if config or the index cannot be loaded.
pub fn list(index: Option<PathBuf>) -> anyhow::Result<Vec<Entry>> {
    let context = open(&QueryArgs {
        index,
        ..QueryArgs::default()
    })?;
    Ok(context.index.entries().to_vec())
}

/// The result of resolving a selection against a query's result list.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The selection expanded to whole lines.
    pub line: LineSelection,
    /// The chosen tag, lower-cased, when the row exists.
    pub tag: Option<String>,
    /// Where submitting would navigate.
    pub target: Option<Target>,
}

/// Run a query, then resolve a selection in its rendered title list.
///
/// # Errors
///
/// Returns an error if the query is too long or the index cannot be loaded.
pub fn resolve(
    query: &str,
    start: usize,
    end: Option<usize>,
    args: &QueryArgs,
) -> anyhow::Result<Resolution> {
    validate_query(query)?;
    let context = open(args)?;

    let mut widget = context.widget();
    widget.set_query(query);

    let Some(selection) = widget.select(start, end.unwrap_or(start)) else {
        anyhow::bail!("Search widget no longer accepts selections");
    };

    let tag = selection.tag.map(|_| widget.choice().to_string());
    let target = tag
        .as_deref()
        .map(|tag| compose_target(tag, &context.navigation));

    Ok(Resolution {
        line: selection.line,
        tag,
        target,
    })
}

/// Convert a legacy keyword script to a JSON index.
///
/// # Returns
///
/// The number of entries written.
///
/// # Errors
///
/// Returns an error if the output already exists, the script is invalid,
/// or the output cannot be written.
pub fn convert(input: &Path, output: &Path) -> anyhow::Result<usize> {
    if output.exists() {
        anyhow::bail!("Output already exists: {}", output.display());
    }

    let source = fs::read_to_string(input).with_context(|| format!("Read {}", input.display()))?;
    let entries = script::parse(&source).with_context(|| format!("Parse {}", input.display()))?;
    let index = KeywordIndex::new(entries).with_context(|| format!("Validate {}", input.display()))?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Create dir {}", parent.display()))?;
    }
    fs::write(output, index.to_json()?).with_context(|| format!("Write {}", output.display()))?;

    tracing::info!(input = %input.display(), output = %output.display(), entries = index.len(), "converted");
    Ok(index.len())
}

/// Print a result list: one line per result, then a count line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_results<W: Write>(
    out: &mut W,
    query: &str,
    results: &ResultList,
    with_tags: bool,
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No matches found for '{query}'");
    }

    for (tag, title) in results.rows() {
        if with_tags {
            writeln!(out, "{tag}\t{title}")?;
        } else {
            writeln!(out, "{title}")?;
        }
    }
    writeln!(out, "{} result(s)", results.len())
}
