//! CLI interface for docsearch.
//!
//! Provides command-line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::search::MatchMode;

/// Command-line interface for docsearch.
#[derive(Parser)]
#[command(name = "docsearch")]
#[command(author, version, about = "Live keyword search over documentation indexes", long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that runs queries.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Keyword index file (.json, or a legacy .js keyword script).
    #[arg(short, long)]
    pub index: Option<PathBuf>,

    /// Maximum number of results to render.
    #[arg(short, long)]
    pub max_list: Option<usize>,

    /// How query words are interpreted.
    #[arg(long)]
    pub mode: Option<MatchMode>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Filter the keyword index with a query and print the result list.
    Search {
        /// The query; every word must match the tag, title, or keywords.
        query: String,

        #[command(flatten)]
        args: QueryArgs,

        /// Print `tag<TAB>title` rows instead of titles only.
        #[arg(short, long)]
        tags: bool,
    },

    /// List every entry in the keyword index.
    List {
        /// Keyword index file.
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Run a query, then resolve a selection in its rendered title list.
    Resolve {
        /// The query.
        query: String,

        /// Selection start, as a character offset into the title list.
        #[arg(short, long)]
        start: usize,

        /// Selection end (defaults to the start, i.e. a caret).
        #[arg(short, long)]
        end: Option<usize>,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Drive a search widget from stdin, one event per line.
    ///
    /// Each line replaces the query text. `:select START [END]` selects in
    /// the title list, `:go` or an empty line submits, `:show` prints the
    /// current lists, and `:quit` exits.
    Interactive {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Convert a legacy keyword script into a JSON index.
    Convert {
        /// Keyword script to read.
        input: PathBuf,

        /// JSON index file to write.
        output: PathBuf,
    },

    /// Start the MCP server for AI editor integration.
    #[cfg(feature = "mcp")]
    Serve {
        /// Keyword index file.
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}
