use std::{fmt::Display, fs, path::Path};

use anyhow::{Context, Result};

pub mod error;
pub mod grid;
pub mod parsing;
pub mod point;
pub mod search;
pub mod solutions;

pub const DEFAULT_INPUTS: &str = "inputs";

/// A puzzle unit with its answers rendered for printing.
pub type Solution = fn(&str) -> Result<(String, String)>;

fn erase<A: Display, B: Display>(
    f: fn(&str) -> Result<(A, B)>,
    input: &str,
) -> Result<(String, String)> {
    let (part1, part2) = f(input)?;
    Ok((part1.to_string(), part2.to_string()))
}

macro_rules! all_solutions {
    ($($day:ident),* $(,)?) => {
        /// Every puzzle unit, in day order.
        pub const ALL_SOLUTIONS: &[Solution] = &[$(|input: &str| erase(solutions::$day, input)),*];
    };
}

all_solutions![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14, day15,
    day16, day17, day18, day19, day20, day21,
];

/// Reads `<dir>/NN.txt` for day `n`.
pub fn load_input(dir: &Path, n: usize) -> Result<String> {
    let path = dir.join(format!("{n:02}.txt"));
    fs::read_to_string(&path).with_context(|| format!("could not open file {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(Path::new(DEFAULT_INPUTS), n)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fmt::Display;

    use anyhow::Result;

    pub use crate::default_input;

    pub fn execute_day<S: Display, T: Display>(
        n: usize,
        f: fn(&str) -> Result<(S, T)>,
        input_loader: fn(usize) -> Result<String>,
    ) -> Result<(S, T)> {
        f(&input_loader(n)?)
    }

    pub fn execute_day_input<S: Display, T: Display>(
        f: fn(&str) -> Result<(S, T)>,
        input: &str,
    ) -> Result<(S, T)> {
        f(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_day_is_registered() {
        assert_eq!(ALL_SOLUTIONS.len(), 21);
    }

    #[test]
    fn empty_input_is_rejected() {
        for (i, day) in ALL_SOLUTIONS.iter().enumerate() {
            for input in ["", "\n\n"] {
                assert!(day(input).is_err(), "day {} accepted {input:?}", i + 1);
            }
        }
    }

    #[test]
    fn answers_are_rendered() -> Result<()> {
        let (part1, part2) = ALL_SOLUTIONS[5]("Time: 7\nDistance: 9\n")?;
        assert_eq!((part1.as_str(), part2.as_str()), ("4", "4"));
        Ok(())
    }

    #[test]
    fn missing_input_names_the_file() {
        let err = load_input(Path::new("no-such-dir"), 3).unwrap_err();
        assert!(err.to_string().contains("03.txt"));
    }
}
