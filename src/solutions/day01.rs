use aho_corasick::AhoCorasick;
use anyhow::Result;

use crate::parsing;

/// Digits first, then their names, so a pattern index maps to its value with `% 9 + 1`.
const PATTERNS: [&str; 18] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine",
];

/// First and last digit of a line as a two-digit number, or 0 if the line holds no digit.
///
/// Matches may overlap ("twone" holds both two and one), which regex can't express.
fn calibration(ac: &AhoCorasick, line: &str, spelled: bool) -> usize {
    let mut digits = ac.find_overlapping_iter(line).filter_map(|mat| {
        let index = mat.pattern().as_usize();
        (spelled || index < 9).then_some(index % 9 + 1)
    });
    match digits.next() {
        Some(first) => first * 10 + digits.last().unwrap_or(first),
        None => 0,
    }
}

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let ac = AhoCorasick::new(PATTERNS)?;
    let mut sum_part1 = 0;
    let mut sum_part2 = 0;
    for line in parsing::lines(input)? {
        sum_part1 += calibration(&ac, line, false);
        sum_part2 += calibration(&ac, line, true);
    }
    Ok((sum_part1, sum_part2))
}
