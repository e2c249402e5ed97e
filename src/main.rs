use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aoc2023_units::{load_input, Solution, ALL_SOLUTIONS, DEFAULT_INPUTS};

/// Advent of Code 2023 puzzle units.
#[derive(Parser, Debug)]
struct Cli {
    /// Days to run (e.g. 1 5 21). Runs every day when left out.
    days: Vec<usize>,

    /// Directory holding the puzzle inputs as NN.txt.
    #[arg(long, env = "AOC_INPUTS", default_value = DEFAULT_INPUTS)]
    inputs: PathBuf,

    /// Print how long each day took.
    #[arg(short, long)]
    timed: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let days = if cli.days.is_empty() {
        (1..=ALL_SOLUTIONS.len()).collect()
    } else {
        cli.days
    };

    let mut total = Duration::default();
    for n in days {
        let Some(&day) = n.checked_sub(1).and_then(|i| ALL_SOLUTIONS.get(i)) else {
            bail!("no solution for day {n}");
        };
        let input = load_input(&cli.inputs, n)?;
        total += execute_day(n, day, &input, cli.timed)?;
    }
    if cli.timed {
        println!("Total processing time: {}", format_duration(total));
    }
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(n: usize, day: Solution, input: &str, timed: bool) -> Result<Duration> {
    tracing::debug!("day {n}: {} bytes of input", input.len());

    let start = Instant::now();
    let (part1, part2) = day(input).with_context(|| format!("day {n} failed"))?;
    let elapsed = start.elapsed();

    println!("Day {}:", n);
    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    if timed {
        println!("  Finished in {}", format_duration(elapsed));
    }
    println!("---------------------");
    Ok(elapsed)
}
