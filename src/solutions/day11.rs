use anyhow::{bail, Result};
use itertools::Itertools;

use crate::{grid::Grid, point::Point};

/// Galaxy positions after every empty row and column has grown to `factor` copies of itself.
fn expand(grid: &Grid, factor: i64) -> Vec<Point> {
    let galaxies: Vec<Point> = grid
        .positions()
        .filter(|&p| grid.get(p) == Some(b'#'))
        .collect();
    let empty_before = |len: usize, occupied: &dyn Fn(i64) -> bool| -> Vec<i64> {
        let mut offsets = Vec::with_capacity(len);
        let mut empty = 0;
        for i in 0..len as i64 {
            offsets.push(empty);
            if !occupied(i) {
                empty += 1;
            }
        }
        offsets
    };
    let rows = empty_before(grid.height(), &|y| galaxies.iter().any(|g| g.y == y));
    let cols = empty_before(grid.width(), &|x| galaxies.iter().any(|g| g.x == x));

    galaxies
        .iter()
        .map(|g| {
            Point::new(
                g.x + cols[g.x as usize] * (factor - 1),
                g.y + rows[g.y as usize] * (factor - 1),
            )
        })
        .collect()
}

fn distance_sum(grid: &Grid, factor: i64) -> i64 {
    expand(grid, factor)
        .into_iter()
        .tuple_combinations()
        .map(|(a, b)| a.manhattan(b))
        .sum()
}

pub fn day11(input: &str) -> Result<(i64, i64)> {
    let grid = Grid::parse(input)?;
    if grid.find(b'#').is_none() {
        bail!("universe holds no galaxies");
    }
    Ok((distance_sum(&grid, 2), distance_sum(&grid, 1_000_000)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ...#......
        .......#..
        #.........
        ..........
        ......#...
        .#........
        .........#
        ..........
        .......#..
        #...#.....
    "};

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(execute_day_input(day11, EXAMPLE)?.0, 374);
        Ok(())
    }

    #[test]
    fn larger_expansion() -> Result<()> {
        let grid = Grid::parse(EXAMPLE)?;
        assert_eq!(distance_sum(&grid, 10), 1030);
        assert_eq!(distance_sum(&grid, 100), 8410);
        Ok(())
    }

    #[test]
    fn single_galaxy_has_no_pairs() -> Result<()> {
        assert_eq!(execute_day_input(day11, "..\n.#\n")?, (0, 0));
        assert!(execute_day_input(day11, "..\n..\n").is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/11.txt"]
    fn test_day11_input() -> Result<()> {
        assert_eq!(execute_day(11, day11, default_input)?, (9522407, 544723432977));
        Ok(())
    }
}
