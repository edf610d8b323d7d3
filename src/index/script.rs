//! Parser for legacy keyword scripts.
//!
//! Documentation generators emit the search index as a script holding a
//! flat array of string pairs:
//!
//! ```text
//! Keyword =
//! [
//! 'bilinear  dismod_at Bilinear Interpolation  ',' age grid time function ',
//! 'rate_table  The Rate Table  ',' iota rho chi omega ',
//! ]
//! ```
//!
//! The first string of a pair is the tag followed by the title; the second
//! is the auxiliary search text.

use crate::index::{Entry, IndexError};

const ARRAY_NAME: &str = "Keyword";

/// Parse a keyword script into entries, in array order.
///
/// # Errors
///
/// Returns `IndexError::ScriptError` if the array is missing, unterminated,
/// contains something other than string literals, or has an odd number of
/// strings.
pub fn parse(source: &str) -> Result<Vec<Entry>, IndexError> {
    let mut scanner = Scanner::new(source);
    scanner.seek_array()?;

    let mut strings = Vec::new();
    loop {
        scanner.skip_separators();
        match scanner.peek() {
            Some(']') => break,
            Some(quote @ ('\'' | '"')) => {
                scanner.bump();
                strings.push(scanner.string_literal(quote)?);
            }
            Some(c) => return Err(scanner.error(format!("unexpected character '{c}'"))),
            None => return Err(scanner.error("unterminated keyword array")),
        }
    }

    if strings.len() % 2 != 0 {
        return Err(scanner.error(format!(
            "expected pairs of strings, found {} strings",
            strings.len()
        )));
    }

    Ok(strings
        .chunks_exact(2)
        .map(|pair| split_pair(&pair[0], &pair[1]))
        .collect())
}

fn split_pair(head: &str, other: &str) -> Entry {
    let head = head.trim();
    let (tag, title) = head
        .split_once(char::is_whitespace)
        .unwrap_or((head, ""));

    Entry::new(tag, title.trim(), other.trim())
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> IndexError {
        IndexError::ScriptError {
            line: self.line,
            message: message.into(),
        }
    }

    /// Advance to just past the `[` opening the keyword array.
    fn seek_array(&mut self) -> Result<(), IndexError> {
        let name: Vec<char> = ARRAY_NAME.chars().collect();
        let start = self
            .chars
            .windows(name.len())
            .position(|window| window == name.as_slice())
            .unwrap_or(0);
        while self.pos < start {
            self.bump();
        }

        while let Some(c) = self.bump() {
            if c == '[' {
                return Ok(());
            }
        }
        Err(self.error("no keyword array found"))
    }

    /// Skip whitespace, commas, and `//` line comments.
    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.bump();
            } else if c == '/' && self.peek_next() == Some('/') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else {
                return;
            }
        }
    }

    fn string_literal(&mut self, quote: char) -> Result<String, IndexError> {
        let start_line = self.line;
        let unterminated = || IndexError::ScriptError {
            line: start_line,
            message: "unterminated string literal".to_string(),
        };

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(c) => value.push(c),
                    None => return Err(unterminated()),
                },
                Some('\n') | None => return Err(unterminated()),
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// ------------------------------------------------------------
// generated keyword list
// ------------------------------------------------------------
Keyword =
[
'dismod_at  Disease Rates as Functions of Age and Time  ',' ',
'bilinear  dismod_at Bilinear Interpolation  ',' age grid time function interpolant ',
'user_students.py  Using Student\\'s-t to Fitting Data with Outliers  ',' ',
]

var MaxList = 100;
";

    #[test]
    fn parses_pairs_in_order() {
        let entries = parse(SAMPLE).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tag, "dismod_at");
        assert_eq!(entries[0].title, "Disease Rates as Functions of Age and Time");
        assert_eq!(entries[0].other, "");
        assert_eq!(entries[1].tag, "bilinear");
        assert_eq!(entries[1].other, "age grid time function interpolant");
    }

    #[test]
    fn unescapes_quotes() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries[2].tag, "user_students.py");
        assert_eq!(entries[2].title, "Using Student's-t to Fitting Data with Outliers");
    }

    #[test]
    fn empty_array() {
        assert!(parse("Keyword = [\n]\n").unwrap().is_empty());
    }

    #[test]
    fn tag_without_title() {
        let entries = parse("Keyword = ['lonely', 'words']").unwrap();
        assert_eq!(entries[0].tag, "lonely");
        assert_eq!(entries[0].title, "");
    }

    #[test]
    fn odd_number_of_strings() {
        let err = parse("Keyword = ['a  A', 'x', 'b  B']").unwrap_err();
        assert!(err.to_string().contains("pairs"));
    }

    #[test]
    fn unterminated_array() {
        let err = parse("Keyword = ['a  A', 'x',").unwrap_err();
        assert!(err.to_string().contains("unterminated keyword array"));
    }

    #[test]
    fn unterminated_string_reports_line() {
        let err = parse("Keyword =\n[\n'a  A', 'x\n]").unwrap_err();
        match err {
            IndexError::ScriptError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_array() {
        assert!(parse("var MaxList = 100;").is_err());
    }

    #[test]
    fn unexpected_token() {
        let err = parse("Keyword = ['a  A', x]").unwrap_err();
        assert!(err.to_string().contains("unexpected character 'x'"));
    }
}
