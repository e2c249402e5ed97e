use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::{
    error::PuzzleError,
    grid::Grid,
    point::Point,
    search::{self, Frontier},
};

type Beam = (Point, Point);

fn deflect(cell: u8, dir: Point) -> ([Point; 2], usize) {
    match cell {
        b'/' => ([Point::new(-dir.y, -dir.x), dir], 1),
        b'\\' => ([Point::new(dir.y, dir.x), dir], 1),
        b'|' if dir.x != 0 => ([Point::UP, Point::DOWN], 2),
        b'-' if dir.y != 0 => ([Point::LEFT, Point::RIGHT], 2),
        _ => ([dir, dir], 1),
    }
}

/// Tiles a beam passes through after entering at `start`.
fn energized<F: Frontier<Beam>>(grid: &Grid, start: Beam) -> usize {
    let beams = search::explore::<F, _, _>([start], |&(pos, dir)| {
        let (dirs, count) = grid.get(pos).map_or(([dir, dir], 0), |cell| deflect(cell, dir));
        dirs.into_iter()
            .take(count)
            .map(move |d| (pos + d, d))
            .filter(move |&(next, _)| grid.contains(next))
    });
    beams
        .into_iter()
        .map(|(pos, _)| pos)
        .collect::<FxHashSet<_>>()
        .len()
}

/// Every entry point along the edge, facing inwards.
fn edge_entries(grid: &Grid) -> Vec<Beam> {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let mut entries = vec![];
    for x in 0..w {
        entries.push((Point::new(x, 0), Point::DOWN));
        entries.push((Point::new(x, h - 1), Point::UP));
    }
    for y in 0..h {
        entries.push((Point::new(0, y), Point::RIGHT));
        entries.push((Point::new(w - 1, y), Point::LEFT));
    }
    entries
}

pub fn day16(input: &str) -> Result<(usize, usize)> {
    let grid = Grid::parse(input)?;
    if let Some(at) = grid
        .positions()
        .find(|&p| !matches!(grid.get(p), Some(b'.' | b'/' | b'\\' | b'|' | b'-')))
    {
        bail!(PuzzleError::UnexpectedCell {
            cell: char::from(grid.get(at).unwrap_or_default()),
            at,
        });
    }

    let part1 = energized::<Vec<_>>(&grid, (Point::ZERO, Point::RIGHT));
    let part2 = edge_entries(&grid)
        .par_iter()
        .map(|&entry| energized::<Vec<_>>(&grid, entry))
        .max()
        .context("contraption has no edge")?;
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;
    use std::collections::VecDeque;

    const EXAMPLE: &str = indoc! {r"
        .|...\....
        |.-.\.....
        .....|-...
        ........|.
        ..........
        .........\
        ..../.\\..
        .-.-/..|..
        .|....-|.\
        ..//.|....
    "};

    #[test]
    fn test_day16() -> Result<()> {
        assert_eq!(execute_day_input(day16, EXAMPLE)?, (46, 51));
        Ok(())
    }

    #[test]
    fn frontier_order_does_not_matter() -> Result<()> {
        let grid = Grid::parse(EXAMPLE)?;
        for entry in edge_entries(&grid) {
            assert_eq!(
                energized::<Vec<_>>(&grid, entry),
                energized::<VecDeque<_>>(&grid, entry)
            );
        }
        assert_eq!(energized::<VecDeque<_>>(&grid, (Point::new(3, 0), Point::DOWN)), 51);
        Ok(())
    }

    #[test]
    fn mirrors_turn_beams() {
        assert_eq!(deflect(b'/', Point::RIGHT).0[0], Point::UP);
        assert_eq!(deflect(b'/', Point::DOWN).0[0], Point::LEFT);
        assert_eq!(deflect(b'\\', Point::RIGHT).0[0], Point::DOWN);
        assert_eq!(deflect(b'\\', Point::UP).0[0], Point::LEFT);
        assert_eq!(deflect(b'|', Point::UP), ([Point::UP, Point::UP], 1));
    }

    #[test]
    fn unknown_tile_is_rejected() {
        assert!(execute_day_input(day16, "..\n.x\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/16.txt"]
    fn test_day16_input() -> Result<()> {
        assert_eq!(execute_day(16, day16, default_input)?, (8034, 8225));
        Ok(())
    }
}
