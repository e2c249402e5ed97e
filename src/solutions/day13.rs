use anyhow::{bail, Result};

use crate::{error::PuzzleError, grid::Grid, parsing};

/// Rows of a pattern as bitmasks, plus the same for its columns.
struct Pattern {
    rows: Vec<u32>,
    cols: Vec<u32>,
}

impl Pattern {
    fn new(grid: &Grid) -> Result<Self> {
        if grid.width() > 32 || grid.height() > 32 {
            bail!("pattern is larger than 32x32");
        }
        let mut rows = vec![0; grid.height()];
        let mut cols = vec![0; grid.width()];
        for pos in grid.positions() {
            match grid.get(pos) {
                Some(b'#') => {
                    rows[pos.y as usize] |= 1u32 << pos.x;
                    cols[pos.x as usize] |= 1u32 << pos.y;
                }
                Some(b'.') | None => {}
                Some(cell) => bail!(PuzzleError::UnexpectedCell {
                    cell: char::from(cell),
                    at: pos,
                }),
            }
        }
        Ok(Self { rows, cols })
    }

    /// Summary value of the mirror line that leaves exactly `smudges` differing cells.
    fn summarize(&self, smudges: u32) -> Option<usize> {
        mirror(&self.cols, smudges).or_else(|| mirror(&self.rows, smudges).map(|r| 100 * r))
    }
}

/// Number of lines before the mirror.
fn mirror(lines: &[u32], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&split| {
        let (before, after) = lines.split_at(split);
        before
            .iter()
            .rev()
            .zip(after)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum::<u32>()
            == smudges
    })
}

pub fn day13(input: &str) -> Result<(usize, usize)> {
    let mut part1 = 0;
    let mut part2 = 0;
    for (index, block) in parsing::blocks(input)?.iter().enumerate() {
        let pattern = Pattern::new(&Grid::from_lines(block)?)?;
        let (Some(clean), Some(smudged)) = (pattern.summarize(0), pattern.summarize(1)) else {
            bail!(PuzzleError::Impossible(format!(
                "pattern {} has no line of reflection",
                index + 1
            )));
        };
        part1 += clean;
        part2 += smudged;
    }
    Ok((part1, part2))
}
