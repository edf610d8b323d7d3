//! Entry matching against a tokenized query.

use clap::ValueEnum;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::index::Entry;

/// Upper bound on the compiled size of a single token's pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// How query tokens are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Each token is a case-insensitive regular expression (default).
    #[default]
    Pattern,
    /// Each token is a case-insensitive plain substring.
    Literal,
}

/// A compiled query: an entry matches when every token matches at least
/// one of its tag, title, or auxiliary text.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// `None` marks a token that failed to compile; it never matches.
    tokens: Vec<Option<Regex>>,
}

impl Matcher {
    /// Compile tokens for the given mode.
    ///
    /// A token that is not a valid pattern is kept as a broken token rather
    /// than rejected, so the query as a whole simply has no matches.
    #[must_use]
    pub fn new(tokens: &[&str], mode: MatchMode) -> Self {
        let tokens = tokens
            .iter()
            .map(|token| compile(token, mode))
            .collect();

        Self { tokens }
    }

    /// Test one entry against every token.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.tokens.iter().all(|token| {
            token.as_ref().is_some_and(|re| {
                re.is_match(&entry.tag) || re.is_match(&entry.title) || re.is_match(&entry.other)
            })
        })
    }

    /// Number of tokens that failed to compile.
    #[must_use]
    pub fn broken_tokens(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_none()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn compile(token: &str, mode: MatchMode) -> Option<Regex> {
    let source = match mode {
        MatchMode::Pattern => token.to_string(),
        MatchMode::Literal => regex::escape(token),
    };

    match RegexBuilder::new(&source)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(token, error = %e, "query token is not a valid pattern; it matches nothing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilinear() -> Entry {
        Entry::new(
            "bilinear",
            "dismod_at Bilinear Interpolation",
            "age grid time function interpolant",
        )
    }

    fn matches(query: &[&str], mode: MatchMode, entry: &Entry) -> bool {
        Matcher::new(query, mode).matches(entry)
    }

    mod semantics {
        use super::*;

        #[test]
        fn empty_query_matches_everything() {
            assert!(matches(&[], MatchMode::Pattern, &bilinear()));
            assert!(matches(&[], MatchMode::Literal, &Entry::new("x", "", "")));
        }

        #[test]
        fn token_may_match_any_field() {
            let entry = bilinear();
            assert!(matches(&["bilinear"], MatchMode::Pattern, &entry));
            assert!(matches(&["Interpolation"], MatchMode::Pattern, &entry));
            assert!(matches(&["grid"], MatchMode::Pattern, &entry));
            assert!(!matches(&["covariate"], MatchMode::Pattern, &entry));
        }

        #[test]
        fn all_tokens_must_match() {
            let entry = bilinear();
            assert!(matches(&["age", "bilinear"], MatchMode::Pattern, &entry));
            assert!(!matches(&["age", "covariate"], MatchMode::Pattern, &entry));
        }

        #[test]
        fn tokens_may_match_different_fields() {
            assert!(matches(&["bilinear", "interpolant"], MatchMode::Pattern, &bilinear()));
        }

        #[test]
        fn case_insensitive() {
            let entry = bilinear();
            assert!(matches(&["BILINEAR"], MatchMode::Pattern, &entry));
            assert!(matches(&["GrId"], MatchMode::Literal, &entry));
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn pattern_mode_interprets_syntax() {
            let entry = Entry::new("age_table", "The Age Table", "");
            assert!(matches(&["^age_"], MatchMode::Pattern, &entry));
            assert!(matches(&["(rate|age)_table"], MatchMode::Pattern, &entry));
            assert!(!matches(&["^table"], MatchMode::Pattern, &entry));
        }

        #[test]
        fn literal_mode_escapes_syntax() {
            let entry = Entry::new("run_cmake.sh", "bin/run_cmake.sh: Options", "");
            assert!(matches(&["run_cmake.sh"], MatchMode::Literal, &entry));
            assert!(!matches(&["run.cmake"], MatchMode::Literal, &entry));
            assert!(matches(&["run.cmake"], MatchMode::Pattern, &entry));
        }

        #[test]
        fn literal_mode_accepts_unbalanced_brackets() {
            let entry = Entry::new("syntax", "Syntax (command line)", "");
            assert!(matches(&["(command"], MatchMode::Literal, &entry));
        }
    }

    mod broken_tokens {
        use super::*;

        #[test]
        fn unterminated_group_never_matches() {
            let matcher = Matcher::new(&["(age"], MatchMode::Pattern);
            assert_eq!(matcher.broken_tokens(), 1);
            assert!(!matcher.matches(&bilinear()));
        }

        #[test]
        fn broken_token_excludes_otherwise_matching_entries() {
            let matcher = Matcher::new(&["bilinear", "[grid"], MatchMode::Pattern);
            assert!(!matcher.matches(&bilinear()));
        }

        #[test]
        fn unsupported_lookaround_is_broken() {
            let matcher = Matcher::new(&["age(?=_table)"], MatchMode::Pattern);
            assert_eq!(matcher.broken_tokens(), 1);
        }
    }
}
