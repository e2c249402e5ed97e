//! Line and token helpers shared by the puzzle units.

use std::str::FromStr;

use anyhow::{Context, Result};

use crate::error::PuzzleError;

/// Rejects input that holds nothing but whitespace.
pub fn non_empty(input: &str) -> Result<&str, PuzzleError> {
    if input.trim().is_empty() {
        Err(PuzzleError::EmptyInput)
    } else {
        Ok(input)
    }
}

/// Non-empty input split into lines, with trailing blank lines dropped.
pub fn lines(input: &str) -> Result<Vec<&str>, PuzzleError> {
    let mut lines: Vec<&str> = non_empty(input)?.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

/// Groups of lines separated by blank lines.
pub fn blocks(input: &str) -> Result<Vec<Vec<&str>>, PuzzleError> {
    let mut blocks = vec![];
    let mut current = vec![];
    for line in non_empty(input)?.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    Ok(blocks)
}

/// Wraps [`str::parse`] so the failing token shows up in the error.
pub fn parse_with_context<T>(token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse()
        .with_context(|| format!("failed to parse {token:?}"))
}

/// Every whitespace-separated token of `s`, parsed.
pub fn numbers<T>(s: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.split_whitespace().map(parse_with_context).collect()
}

/// Splits `s` at the first `delimiter`, failing with a line-tagged error if it is missing.
pub fn split_once<'a>(
    s: &'a str,
    delimiter: &str,
    line_index: usize,
) -> Result<(&'a str, &'a str), PuzzleError> {
    s.split_once(delimiter)
        .ok_or_else(|| PuzzleError::malformed(line_index, format!("expected {delimiter:?}")))
}

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_uint_from_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(non_empty(""), Err(PuzzleError::EmptyInput));
        assert_eq!(non_empty(" \n\n"), Err(PuzzleError::EmptyInput));
        assert_eq!(lines("\n"), Err(PuzzleError::EmptyInput));
        assert!(blocks("").is_err());
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let blocks = blocks("a\nb\n\nc\n\n\nd\n").unwrap();
        assert_eq!(blocks, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn trailing_blank_lines_are_dropped() {
        assert_eq!(lines("x\ny\n\n").unwrap(), ["x", "y"]);
    }

    #[test]
    fn numbers_report_the_bad_token() {
        assert_eq!(numbers::<i64>(" 1 -2  3").unwrap(), [1, -2, 3]);
        let err = numbers::<u32>("1 x2").unwrap_err();
        assert!(err.to_string().contains("\"x2\""));
    }

    #[test]
    fn uint_from_bytes() {
        assert_eq!(parse_uint_from_bytes(b"0"), 0);
        assert_eq!(parse_uint_from_bytes(b"467"), 467);
        assert_eq!(parse_uint_from_bytes(b"26501365"), 26_501_365);
    }

    #[test]
    fn split_once_names_the_line() {
        let err = split_once("abc", ":", 2).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Malformed {
                line: 3,
                reason: "expected \":\"".to_string()
            }
        );
    }
}
