use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureInputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for an {record} record (must be at least {min} chars)")]
    LineTooShort { record: &'static str, min: usize },
    #[error("Expected at least {expected} whitespace-separated fields, found {found}")]
    MissingFields { expected: usize, found: usize },
}

/// Returns the trimmed text of a fixed-column field, or "" when the line is too short.
pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

/// Returns the single character at a 0-based column, if it is not blank.
pub(crate) fn column_char(line: &str, idx: usize) -> Option<char> {
    line.get(idx..idx + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

/// Splits a residue number field with an optional trailing insertion code ("42A").
pub(crate) fn split_residue_number(field: &str) -> Option<(isize, Option<char>)> {
    let field = field.trim();
    let last = field.chars().last()?;
    if last.is_ascii_alphabetic() {
        let number = field[..field.len() - last.len_utf8()].trim().parse().ok()?;
        Some((number, Some(last)))
    } else {
        Some((field.parse().ok()?, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_trim_tolerates_short_lines() {
        assert_eq!(slice_and_trim("ATOM      1", 6, 11), "1");
        assert_eq!(slice_and_trim("ATOM", 6, 11), "");
        assert_eq!(slice_and_trim("ATOM   12", 6, 11), "12");
    }

    #[test]
    fn column_char_ignores_blanks() {
        assert_eq!(column_char("ab c", 3), Some('c'));
        assert_eq!(column_char("ab c", 2), None);
        assert_eq!(column_char("ab", 5), None);
    }

    #[test]
    fn split_residue_number_handles_insertion_codes() {
        assert_eq!(split_residue_number("42"), Some((42, None)));
        assert_eq!(split_residue_number(" 42A"), Some((42, Some('A'))));
        assert_eq!(split_residue_number("-3"), Some((-3, None)));
        assert_eq!(split_residue_number("x"), None);
        assert_eq!(split_residue_number(""), None);
    }
}
