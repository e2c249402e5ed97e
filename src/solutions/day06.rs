use anyhow::{bail, Context, Result};

use crate::parsing;

#[derive(Debug, Clone, Copy)]
struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn distance(&self, charge: u64) -> u64 {
        charge * (self.time - charge)
    }

    /// Number of charge times beating the record.
    ///
    /// Distance is symmetric around `time / 2`, so only the first winning charge is searched for.
    fn ways_to_win(&self) -> u64 {
        let half = self.time / 2;
        if self.distance(half) <= self.record {
            return 0;
        }
        // lowest charge in 0..=half that wins
        let (mut lo, mut hi) = (0, half);
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.distance(mid) > self.record {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.time - 2 * lo + 1
    }
}

fn parse_line<'a>(line: Option<&&'a str>, label: &str) -> Result<&'a str> {
    line.and_then(|line| line.strip_prefix(label))
        .with_context(|| format!("expected a {label:?} line"))
}

pub fn day6(input: &str) -> Result<(u64, u64)> {
    let lines = parsing::lines(input)?;
    let times = parse_line(lines.first(), "Time:")?;
    let records = parse_line(lines.get(1), "Distance:")?;

    let races: Vec<Race> = parsing::numbers(times)?
        .into_iter()
        .zip(parsing::numbers(records)?)
        .map(|(time, record)| Race { time, record })
        .collect();
    if races.is_empty() {
        bail!("no races listed");
    }
    let part1: u64 = races.iter().map(Race::ways_to_win).product();

    // bad kerning: the columns are really one number each
    let joined = |s: &str| parsing::parse_with_context::<u64>(&s.replace(' ', ""));
    let race = Race {
        time: joined(times)?,
        record: joined(records)?,
    };
    tracing::debug!("single race: {race:?}");
    let part2 = race.ways_to_win();

    Ok((part1, part2))
}
