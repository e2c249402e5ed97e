use std::ops::Range;

use anyhow::{anyhow, bail, Context, Result};
use rayon::prelude::*;

use crate::parsing;

/// One line of a map: `len` numbers starting at `source` move to `dest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Mapping {
    // source first so sorting orders by source start
    source: u64,
    dest: u64,
    len: u64,
}

impl Mapping {
    fn source_range(&self) -> Range<u64> {
        self.source..self.source + self.len
    }

    fn shift(&self, n: u64) -> u64 {
        n - self.source + self.dest
    }
}

/// A piecewise-linear lookup table, e.g. seed-to-soil. Mappings are sorted and never overlap.
#[derive(Debug)]
struct Stage {
    name: String,
    mappings: Vec<Mapping>,
}

impl Stage {
    fn map(&self, n: u64) -> u64 {
        self.mappings
            .iter()
            .find(|m| m.source_range().contains(&n))
            .map_or(n, |m| m.shift(n))
    }

    /// Maps a whole range, splitting it wherever it crosses a mapping boundary.
    fn map_range(&self, range: Range<u64>) -> Vec<Range<u64>> {
        let mut out = vec![];
        let mut start = range.start;
        for m in &self.mappings {
            if start >= range.end {
                break;
            }
            let source = m.source_range();
            if source.end <= start {
                continue;
            }
            if source.start >= range.end {
                break;
            }
            // unmapped gap in front of this mapping
            if start < source.start {
                out.push(start..source.start);
                start = source.start;
            }
            let end = range.end.min(source.end);
            out.push(m.shift(start)..m.shift(end - 1) + 1);
            start = end;
        }
        if start < range.end {
            out.push(start..range.end);
        }
        out
    }
}

struct Almanac {
    seeds: Vec<u64>,
    stages: Vec<Stage>,
}

impl Almanac {
    fn parse(input: &str) -> Result<Self> {
        let blocks = parsing::blocks(input)?;
        let (seeds, maps) = blocks
            .split_first()
            .ok_or_else(|| anyhow!("almanac has no seeds"))?;
        let seeds = seeds
            .first()
            .and_then(|line| line.strip_prefix("seeds:"))
            .ok_or_else(|| anyhow!("expected \"seeds:\" line"))?;
        let seeds = parsing::numbers(seeds)?;

        let mut stages = vec![];
        for block in maps {
            let Some((header, lines)) = block.split_first() else {
                continue;
            };
            let name = header
                .strip_suffix(" map:")
                .with_context(|| format!("expected map header, found {header:?}"))?;
            let mut mappings = lines
                .iter()
                .map(|line| -> Result<Mapping> {
                    match *parsing::numbers::<u64>(line)?.as_slice() {
                        [dest, source, len] => Ok(Mapping { source, dest, len }),
                        _ => bail!("expected three numbers in {name}, found {line:?}"),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            // empty mappings move nothing
            mappings.retain(|m| m.len > 0);
            mappings.sort();
            stages.push(Stage {
                name: name.to_string(),
                mappings,
            });
        }

        tracing::debug!(
            "{} seeds through stages {:?}",
            seeds.len(),
            stages.iter().map(|s| &s.name).collect::<Vec<_>>()
        );
        Ok(Self { seeds, stages })
    }

    fn location(&self, seed: u64) -> u64 {
        self.stages.iter().fold(seed, |n, stage| stage.map(n))
    }

    fn lowest_location(&self, seeds: Range<u64>) -> Option<u64> {
        self.stages
            .iter()
            .fold(vec![seeds], |ranges, stage| {
                ranges
                    .into_iter()
                    .flat_map(|range| stage.map_range(range))
                    .collect()
            })
            .iter()
            .map(|range| range.start)
            .min()
    }
}

pub fn day5(input: &str) -> Result<(u64, u64)> {
    let almanac = Almanac::parse(input)?;

    let part1 = almanac
        .seeds
        .iter()
        .map(|&seed| almanac.location(seed))
        .min()
        .context("almanac has no seeds")?;

    if almanac.seeds.len() % 2 != 0 {
        bail!("seed ranges need an even number of values");
    }
    let ranges: Vec<Range<u64>> = almanac
        .seeds
        .chunks_exact(2)
        .map(|pair| pair[0]..pair[0] + pair[1])
        .collect();
    let part2 = ranges
        .par_iter()
        .filter_map(|range| almanac.lowest_location(range.clone()))
        .min()
        .context("all seed ranges are empty")?;

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    #[test]
    fn test_day5() -> Result<()> {
        assert_eq!(execute_day_input(day5, EXAMPLE)?, (35, 46));
        Ok(())
    }

    #[test]
    fn range_splitting_matches_brute_force() -> Result<()> {
        let almanac = Almanac::parse(EXAMPLE)?;
        for (start, len) in [(79, 14), (55, 13), (0, 100), (97, 5), (10, 1)] {
            let brute = (start..start + len).map(|s| almanac.location(s)).min();
            assert_eq!(almanac.lowest_location(start..start + len), brute);
        }
        Ok(())
    }

    #[test]
    fn map_range_without_overlap_passes_through() {
        let stage = Stage {
            name: "a-to-b".to_string(),
            mappings: vec![Mapping {
                source: 10,
                dest: 100,
                len: 5,
            }],
        };
        assert_eq!(stage.map_range(0..10), [0..10]);
        assert_eq!(stage.map_range(15..20), [15..20]);
        assert_eq!(stage.map_range(8..17), [8..10, 100..105, 15..17]);
        assert_eq!(stage.map_range(3..3), Vec::<Range<u64>>::new());
    }

    #[test]
    fn empty_mapping_moves_nothing() -> Result<()> {
        let almanac = indoc! {"
            seeds: 1 10

            a-to-b map:
            50 5 0
        "};
        assert_eq!(execute_day_input(day5, almanac)?, (1, 1));
        Ok(())
    }

    #[test]
    fn odd_seed_count_is_rejected() {
        assert!(execute_day_input(day5, "seeds: 1 2 3\n\na-to-b map:\n0 1 1\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/05.txt"]
    fn test_day5_input() -> Result<()> {
        assert_eq!(execute_day(5, day5, default_input)?, (662197086, 52510809));
        Ok(())
    }
}
