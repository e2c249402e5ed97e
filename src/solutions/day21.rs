use anyhow::{bail, Context, Result};

use crate::{error::PuzzleError, grid::Grid, point::Point, search};

const SHORT_WALK: usize = 64;
const LONG_WALK: usize = 26_501_365;

/// Whether `pos` is a garden plot, with the map repeating forever when `tiled`.
fn is_plot(grid: &Grid, pos: Point, tiled: bool) -> bool {
    let pos = if tiled {
        Point::new(
            pos.x.rem_euclid(grid.width() as i64),
            pos.y.rem_euclid(grid.height() as i64),
        )
    } else {
        pos
    };
    grid.get(pos).is_some_and(|cell| cell != b'#')
}

/// Plots reachable in exactly `steps` steps for every entry of `steps`.
///
/// A plot reached in fewer steps of the same parity can be reached again by stepping back and
/// forth, so it counts too.
fn reachable(grid: &Grid, start: Point, steps: &[usize], tiled: bool) -> Vec<usize> {
    let limit = steps.iter().copied().max().unwrap_or_default();
    let distances = search::bfs_distances(
        start,
        |&pos| {
            pos.neighbours()
                .filter(|&next| is_plot(grid, next, tiled))
                .collect::<Vec<_>>()
        },
        Some(limit),
    );
    steps
        .iter()
        .map(|&s| {
            distances
                .values()
                .filter(|&&d| d <= s && d % 2 == s % 2)
                .count()
        })
        .collect()
}

/// Reachable plots on the tiled map, far beyond what a search can cover.
///
/// Once the walk spans whole copies of the map the count grows quadratically in the number of
/// copies crossed, so three samples one map width apart pin it down.
fn reachable_tiled(grid: &Grid, start: Point, steps: usize) -> Result<usize> {
    if grid.width() != grid.height() {
        bail!(PuzzleError::Impossible(format!(
            "map is {}x{}, expected a square",
            grid.width(),
            grid.height()
        )));
    }
    let size = grid.width();
    let (copies, rest) = (steps / size, steps % size);
    if copies < 2 {
        return Ok(reachable(grid, start, &[steps], true)[0]);
    }

    let samples = reachable(grid, start, &[rest, rest + size, rest + 2 * size], true);
    tracing::debug!("samples after {rest} steps and whole map widths: {samples:?}");
    let [a0, a1, a2] = [samples[0], samples[1], samples[2]].map(|s| s as i64);
    let n = copies as i64;
    let first = a1 - a0;
    let second = a2 - 2 * a1 + a0;
    usize::try_from(a0 + n * first + n * (n - 1) / 2 * second).context("reachable count overflows")
}

pub fn day21(input: &str) -> Result<(usize, usize)> {
    let grid = Grid::parse(input)?;
    let start = grid.find(b'S').context("no start tile")?;
    if let Some(at) = grid
        .positions()
        .find(|&p| !matches!(grid.get(p), Some(b'.' | b'#' | b'S')))
    {
        bail!(PuzzleError::UnexpectedCell {
            cell: char::from(grid.get(at).unwrap_or_default()),
            at,
        });
    }

    let part1 = reachable(&grid, start, &[SHORT_WALK], false)[0];
    Ok((part1, reachable_tiled(&grid, start, LONG_WALK)?))
}
