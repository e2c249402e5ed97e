use anyhow::{bail, Result};

use crate::parsing;

/// Next and previous values of a sequence, via its difference pyramid.
fn extrapolate(values: &[i64]) -> (i64, i64) {
    let mut lasts = vec![];
    let mut firsts = vec![];
    let mut row = values.to_vec();
    while row.iter().any(|&v| v != 0) {
        lasts.push(row[row.len() - 1]);
        firsts.push(row[0]);
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }
    let next = lasts.iter().sum();
    let previous = firsts.iter().rev().fold(0, |below, &first| first - below);
    (next, previous)
}

pub fn day9(input: &str) -> Result<(i64, i64)> {
    let mut part1 = 0;
    let mut part2 = 0;
    for (index, line) in parsing::lines(input)?.into_iter().enumerate() {
        let values: Vec<i64> = parsing::numbers(line)?;
        if values.is_empty() {
            bail!("line {} holds no values", index + 1);
        }
        let (next, previous) = extrapolate(&values);
        tracing::trace!("{values:?}: previous {previous}, next {next}");
        part1 += next;
        part2 += previous;
    }
    Ok((part1, part2))
}
