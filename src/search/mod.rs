//! Query tokenization, matching, result rendering, and selection lookup.

pub mod matcher;
pub mod results;
pub mod selection;
pub mod tokenizer;

use crate::index::KeywordIndex;

pub use matcher::{MatchMode, Matcher};
pub use results::{ResultList, build_results};
pub use selection::{LineSelection, Resolved, expand_to_line, resolve_selection};
pub use tokenizer::tokenize;

/// Default cap on the number of rendered results.
pub const DEFAULT_MAX_LIST: usize = 100;

/// Options controlling one search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_list: usize,
    pub mode: MatchMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_list: DEFAULT_MAX_LIST,
            mode: MatchMode::default(),
        }
    }
}

/// Tokenize, compile, and scan in one step.
#[must_use]
pub fn search(index: &KeywordIndex, query: &str, options: &SearchOptions) -> ResultList {
    let tokens = tokenize(query);
    let matcher = Matcher::new(&tokens, options.mode);
    let results = build_results(index, &matcher, options.max_list);

    tracing::debug!(
        query,
        tokens = tokens.len(),
        broken = matcher.broken_tokens(),
        results = results.len(),
        "search recomputed"
    );
    results
}
