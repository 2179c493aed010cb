//! Remark stripper for SQL dumps.
//!
//! Blanks out `#` remark lines while keeping every other line in place, so
//! line numbers in the cleaned script still match the original dump.
//!
//! Only single-line remarks are handled. Block comments (`/* ... */`) are left
//! untouched and reach the splitter as ordinary statement text.

/// Character that marks a remark line when it appears in the first column.
pub const REMARK_MARKER: char = '#';

/// Check if a line is a remark line.
fn is_remark(line: &str) -> bool {
    line.starts_with(REMARK_MARKER)
}

/// Strip remark lines from a raw SQL script.
///
/// Every line is emitted followed by `\n`, either unchanged or blanked when it
/// starts with `#`. An empty last line (left behind by a terminal newline) is
/// not emitted, so `"a\n"` and `"a"` both become `"a\n"`. Empty input yields an
/// empty string.
pub fn strip(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len() + 1);
    let mut lines = raw.split('\n').peekable();

    while let Some(line) = lines.next() {
        if line.is_empty() && lines.peek().is_none() {
            break;
        }

        if !is_remark(line) {
            output.push_str(line);
        }
        output.push('\n');
    }

    output
}
