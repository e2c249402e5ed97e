use anyhow::{bail, Result};
use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, parsing, point::Point};

struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn parse(line: &str, index: usize) -> Result<Self> {
        // ???.### 1,1,3
        let (springs, groups) = parsing::split_once(line, " ", index)?;
        if let Some(x) = springs.bytes().position(|c| !matches!(c, b'.' | b'#' | b'?')) {
            bail!(PuzzleError::UnexpectedCell {
                cell: char::from(springs.as_bytes()[x]),
                at: Point::new(x as i64, index as i64),
            });
        }
        let groups = groups
            .split(',')
            .map(parsing::parse_with_context)
            .collect::<Result<Vec<usize>>>()?;
        Ok(Self {
            springs: springs.as_bytes().to_vec(),
            groups,
        })
    }

    fn unfold(&self, copies: usize) -> Self {
        let mut springs = self.springs.clone();
        for _ in 1..copies {
            springs.push(b'?');
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(copies),
        }
    }

    fn arrangements(&self, memo: &mut FxHashMap<(usize, usize), u64>) -> u64 {
        memo.clear();
        self.count(0, 0, memo)
    }

    /// Arrangements of `springs[pos..]` that produce `groups[group..]`.
    fn count(&self, pos: usize, group: usize, memo: &mut FxHashMap<(usize, usize), u64>) -> u64 {
        if pos >= self.springs.len() {
            return u64::from(group == self.groups.len());
        }
        if let Some(&known) = memo.get(&(pos, group)) {
            return known;
        }

        let cell = self.springs[pos];
        let mut total = 0;
        if cell != b'#' {
            total += self.count(pos + 1, group, memo);
        }
        if cell != b'.' {
            if let Some(&len) = self.groups.get(group) {
                let end = pos + len;
                let fits = end <= self.springs.len()
                    && !self.springs[pos..end].contains(&b'.')
                    && self.springs.get(end) != Some(&b'#');
                if fits {
                    // the cell after the group must be operational, so skip it too
                    total += self.count(end + 1, group + 1, memo);
                }
            }
        }
        memo.insert((pos, group), total);
        total
    }
}

pub fn day12(input: &str) -> Result<(u64, u64)> {
    let records = parsing::lines(input)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| Record::parse(line, index))
        .collect::<Result<Vec<_>>>()?;

    let mut memo = FxHashMap::default();
    let mut part1 = 0;
    let mut part2 = 0;
    for record in &records {
        part1 += record.arrangements(&mut memo);
        part2 += record.unfold(5).arrangements(&mut memo);
    }
    Ok((part1, part2))
}
