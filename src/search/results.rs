//! Result list construction.

use crate::index::KeywordIndex;
use crate::search::matcher::Matcher;

/// Rendered search results.
///
/// `titles` and `tags` are newline-joined with one line per result, and
/// `row_to_tag[i]` is the tag whose title is rendered on line `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    titles: String,
    tags: String,
    row_to_tag: Vec<String>,
}

impl ResultList {
    /// The rendered title list.
    #[must_use]
    pub fn titles(&self) -> &str {
        &self.titles
    }

    /// The rendered tag list, line-for-line with [`Self::titles`].
    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    #[must_use]
    pub fn row_to_tag(&self) -> &[String] {
        &self.row_to_tag
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.row_to_tag.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_to_tag.is_empty()
    }

    /// Iterate `(tag, title)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.row_to_tag
            .iter()
            .map(String::as_str)
            .zip(self.titles.split('\n'))
    }

    fn push(&mut self, tag: &str, title: &str) {
        if !self.row_to_tag.is_empty() {
            self.titles.push('\n');
            self.tags.push('\n');
        }
        self.titles.push_str(title);
        self.tags.push_str(tag);
        self.row_to_tag.push(tag.to_string());
    }
}

/// Scan the index in order, collecting at most `max_list` matches.
#[must_use]
pub fn build_results(index: &KeywordIndex, matcher: &Matcher, max_list: usize) -> ResultList {
    let mut results = ResultList::default();

    for entry in index.entries() {
        if results.len() >= max_list {
            break;
        }
        if matcher.matches(entry) {
            results.push(&entry.tag, &normalize_title(&entry.title));
        }
    }

    results
}

/// Collapse whitespace runs to single spaces.
///
/// This also keeps every rendered title on exactly one line.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Entry;
    use crate::search::matcher::MatchMode;
    use crate::search::tokenizer::tokenize;

    fn index() -> KeywordIndex {
        KeywordIndex::new(vec![
            Entry::new("age_table", "The  Age\tTable", "age_id age_name"),
            Entry::new("avgint_table", "The Average Integrand Table", "age time"),
            Entry::new("rate_table", "The Rate Table", "iota rho chi omega"),
            Entry::new("bilinear", "Bilinear Interpolation", "age grid time"),
        ])
        .unwrap()
    }

    fn run(query: &str, max_list: usize) -> ResultList {
        let matcher = Matcher::new(&tokenize(query), MatchMode::Pattern);
        build_results(&index(), &matcher, max_list)
    }

    #[test]
    fn empty_query_renders_index_in_order() {
        let results = run("", 100);
        assert_eq!(
            results.row_to_tag(),
            ["age_table", "avgint_table", "rate_table", "bilinear"]
        );
        assert_eq!(results.tags(), "age_table\navgint_table\nrate_table\nbilinear");
    }

    #[test]
    fn titles_are_normalized() {
        let results = run("age_table", 100);
        assert_eq!(results.titles(), "The Age Table");
    }

    #[test]
    fn stops_at_max_list() {
        let results = run("", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results.row_to_tag(), ["age_table", "avgint_table"]);
        assert_eq!(results.titles().lines().count(), 2);
    }

    #[test]
    fn keeps_index_order_for_matches() {
        let results = run("time", 100);
        assert_eq!(results.row_to_tag(), ["avgint_table", "bilinear"]);
    }

    #[test]
    fn no_matches_is_empty() {
        let results = run("covariate", 100);
        assert!(results.is_empty());
        assert_eq!(results.titles(), "");
        assert_eq!(results.tags(), "");
    }

    #[test]
    fn rows_pair_tags_with_titles() {
        let results = run("table", 100);
        let rows: Vec<_> = results.rows().collect();
        assert_eq!(rows[1], ("avgint_table", "The Average Integrand Table"));
    }

    #[test]
    fn normalize_collapses_newlines() {
        assert_eq!(normalize_title("  Two\n lines  "), "Two lines");
        assert_eq!(normalize_title(""), "");
    }
}
