//! Query tokenization.

/// Split a query into whitespace-delimited tokens.
///
/// Leading and trailing whitespace is discarded, so an empty or
/// whitespace-only query yields no tokens.
#[must_use]
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}
