//! Statement splitter for SQL dumps.
//!
//! Splits a cleaned script into individually executable statements. The
//! delimiter may legally appear inside single-quoted literals, so after a plain
//! split on the delimiter the tokens are re-assembled by tracking the parity of
//! unescaped single quotes:
//!
//! - a token with an even number of unescaped quotes is a complete statement;
//! - a token with an odd number opens a literal, and the following tokens are
//!   glued back together with the delimiter until another odd token closes it.
//!
//! A quote is escaped when it is preceded by an odd run of backslashes (`\'`,
//! `\\\'`); an even run (`\\'`) escapes the backslashes themselves. Doubled
//! quotes (`''`) and other quote characters get no special treatment.
//!
//! The splitter never fails. When the input ends inside an open literal the
//! pending statement is dropped; [`split_with_report`] exposes it for callers
//! that want to warn about it.

use super::remarks;

/// Delimiter used when the caller does not choose one.
pub const DEFAULT_DELIMITER: char = ';';

/// Single-quote counts for one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteState {
    /// Number of `'` characters.
    pub total: usize,
    /// Number of `'` characters preceded by an odd run of backslashes.
    pub escaped: usize,
}

impl QuoteState {
    /// Count quotes in a token.
    pub fn of(token: &str) -> Self {
        let mut state = Self::default();
        let mut backslashes = 0usize;

        for c in token.chars() {
            match c {
                '\\' => backslashes += 1,
                '\'' => {
                    state.total += 1;
                    if backslashes % 2 == 1 {
                        state.escaped += 1;
                    }
                    backslashes = 0;
                }
                _ => backslashes = 0,
            }
        }

        state
    }

    /// Number of quotes that open or close a literal.
    pub fn unescaped(&self) -> usize {
        self.total - self.escaped
    }

    /// True if the token leaves literal state unchanged.
    pub fn is_balanced(&self) -> bool {
        self.unescaped() % 2 == 0
    }
}

/// Outcome of splitting a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Complete statements, in script order.
    pub statements: Vec<String>,
    /// Text of a literal that was still open when the input ended.
    pub unterminated: Option<String>,
}

enum State {
    Scanning,
    Accumulating(String),
}

/// Split a cleaned script into statements.
///
/// Statements are returned without their terminating delimiter, in the order
/// they appear. Whitespace that follows a delimiter belongs to the next
/// statement. A blank tail after the last delimiter is discarded.
pub fn split(cleaned: &str, delimiter: char) -> Vec<String> {
    split_with_report(cleaned, delimiter).statements
}

/// Split a cleaned script, also returning any unterminated trailing literal.
pub fn split_with_report(cleaned: &str, delimiter: char) -> SplitReport {
    let tokens: Vec<&str> = cleaned.split(delimiter).collect();
    let last = tokens.len() - 1;
    let mut statements = Vec::new();
    let mut state = State::Scanning;

    for (i, token) in tokens.into_iter().enumerate() {
        let balanced = QuoteState::of(token).is_balanced();

        state = match state {
            State::Scanning if i == last && token.trim().is_empty() => State::Scanning,
            State::Scanning if balanced => {
                statements.push(token.to_string());
                State::Scanning
            }
            State::Scanning => {
                let mut buffer = String::with_capacity(token.len() + 1);
                buffer.push_str(token);
                buffer.push(delimiter);
                State::Accumulating(buffer)
            }
            State::Accumulating(mut buffer) => {
                buffer.push_str(token);
                if balanced {
                    buffer.push(delimiter);
                    State::Accumulating(buffer)
                } else {
                    statements.push(buffer);
                    State::Scanning
                }
            }
        };
    }

    let unterminated = match state {
        State::Scanning => None,
        State::Accumulating(buffer) => {
            tracing::warn!(
                "Dropping unterminated literal at end of script ({} bytes)",
                buffer.len()
            );
            Some(buffer)
        }
    };

    tracing::debug!("Split script into {} statements", statements.len());

    SplitReport {
        statements,
        unterminated,
    }
}

/// Strip remarks from a raw script and split it into statements.
pub fn segment(raw: &str, delimiter: char) -> SplitReport {
    split_with_report(&remarks::strip(raw), delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_state_counts() {
        assert_eq!(QuoteState::of("no quotes"), QuoteState { total: 0, escaped: 0 });
        assert_eq!(QuoteState::of("'a'"), QuoteState { total: 2, escaped: 0 });
        assert_eq!(QuoteState::of(r"'it\'s'"), QuoteState { total: 3, escaped: 1 });
    }

    #[test]
    fn test_quote_state_backslash_runs() {
        // Even run: the backslashes escape each other.
        assert_eq!(QuoteState::of(r"\\'").escaped, 0);
        // Odd runs escape the quote.
        assert_eq!(QuoteState::of(r"\'").escaped, 1);
        assert_eq!(QuoteState::of(r"\\\'").escaped, 1);
        // A run broken by another character restarts.
        assert_eq!(QuoteState::of(r"\x'").escaped, 0);
    }

    #[test]
    fn test_quote_state_parity() {
        assert!(QuoteState::of("VALUES ('a')").is_balanced());
        assert!(!QuoteState::of("VALUES ('a").is_balanced());
        assert!(QuoteState::of(r"VALUES ('it\'s')").is_balanced());
        assert_eq!(QuoteState::of(r"VALUES ('it\'s')").unescaped(), 2);
    }

    #[test]
    fn test_split_empty() {
        assert!(split("", ';').is_empty());
    }

    #[test]
    fn test_split_plain_statements() {
        assert_eq!(split("SELECT 1;SELECT 2", ';'), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_split_keeps_leading_whitespace() {
        assert_eq!(
            split("SELECT 1;\nSELECT 2;\n", ';'),
            vec!["SELECT 1", "\nSELECT 2"]
        );
    }

    #[test]
    fn test_split_keeps_inner_empty_tokens() {
        assert_eq!(split("a;;b;", ';'), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_delimiter_inside_literal() {
        assert_eq!(
            split("INSERT INTO t VALUES ('a;b');", ';'),
            vec!["INSERT INTO t VALUES ('a;b')"]
        );
    }

    #[test]
    fn test_split_literal_spanning_many_tokens() {
        assert_eq!(
            split("INSERT INTO t VALUES ('a;b;c;d');SELECT 1;", ';'),
            vec!["INSERT INTO t VALUES ('a;b;c;d')", "SELECT 1"]
        );
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(
            split(r"INSERT INTO t VALUES ('it\'s fine');", ';'),
            vec![r"INSERT INTO t VALUES ('it\'s fine')"]
        );
    }

    #[test]
    fn test_split_escaped_quote_with_delimiter() {
        assert_eq!(
            split(r"INSERT INTO t VALUES ('it\'s; fine');SELECT 2;", ';'),
            vec![r"INSERT INTO t VALUES ('it\'s; fine')", "SELECT 2"]
        );
    }

    #[test]
    fn test_split_escaped_backslash_closes_literal() {
        assert_eq!(
            split(r"INSERT INTO t VALUES ('dir\\');SELECT 2;", ';'),
            vec![r"INSERT INTO t VALUES ('dir\\')", "SELECT 2"]
        );
    }

    #[test]
    fn test_split_drops_unterminated_literal() {
        assert_eq!(
            split("SELECT 1;INSERT INTO t VALUES ('open;", ';'),
            vec!["SELECT 1"]
        );
    }

    #[test]
    fn test_split_with_report_exposes_unterminated_literal() {
        let report = split_with_report("SELECT 1;INSERT INTO t VALUES ('a;b", ';');
        assert_eq!(report.statements, vec!["SELECT 1"]);
        assert_eq!(
            report.unterminated.as_deref(),
            Some("INSERT INTO t VALUES ('a;b;")
        );
    }

    #[test]
    fn test_split_non_blank_tail_is_kept() {
        assert_eq!(split("SELECT 1;SELECT 2", ';'), vec!["SELECT 1", "SELECT 2"]);
        assert_eq!(split("SELECT 1; -- done", ';'), vec!["SELECT 1", " -- done"]);
    }

    #[test]
    fn test_split_custom_delimiter() {
        assert_eq!(
            split("SELECT 'a|b'|SELECT 2|", '|'),
            vec!["SELECT 'a|b'", "SELECT 2"]
        );
    }

    #[test]
    fn test_split_naive_when_no_literals() {
        let script = "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\nDROP TABLE c";
        let naive: Vec<&str> = script.split(';').collect();
        assert_eq!(split(script, ';'), naive);
    }

    #[test]
    fn test_segment_strips_remarks() {
        let raw = "# MySQL dump\nCREATE TABLE t (v TEXT);\n# data\nINSERT INTO t VALUES ('#1;');\n";
        let report = segment(raw, DEFAULT_DELIMITER);
        assert_eq!(
            report.statements,
            vec!["\nCREATE TABLE t (v TEXT)", "\n\nINSERT INTO t VALUES ('#1;')"]
        );
        assert!(report.unterminated.is_none());
    }
}
