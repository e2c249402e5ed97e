use anyhow::{bail, Result};
use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, grid::Grid, point::Point};

const CYCLES: usize = 1_000_000_000;

/// Rolls every round rock as far towards `dir` as it goes.
fn tilt(grid: &mut Grid, dir: Point) {
    let edge: Vec<Point> = grid.positions().filter(|&p| !grid.contains(p + dir)).collect();
    for start in edge {
        let mut free = start;
        let mut pos = start;
        while let Some(cell) = grid.get(pos) {
            match cell {
                b'#' => free = pos - dir,
                b'O' => {
                    grid.set(pos, b'.');
                    grid.set(free, b'O');
                    free = free - dir;
                }
                _ => {}
            }
            pos = pos - dir;
        }
    }
}

fn spin(grid: &mut Grid) {
    for dir in [Point::UP, Point::LEFT, Point::DOWN, Point::RIGHT] {
        tilt(grid, dir);
    }
}

fn north_load(grid: &Grid) -> usize {
    grid.positions()
        .filter(|&p| grid.get(p) == Some(b'O'))
        .map(|p| grid.height() - p.y as usize)
        .sum()
}

/// Load after `cycles` spins, skipping ahead once the platform repeats a state.
fn load_after(mut grid: Grid, cycles: usize) -> usize {
    let mut seen: FxHashMap<Grid, usize> = FxHashMap::default();
    let mut loads = vec![];
    for i in 0..cycles {
        if let Some(&first) = seen.get(&grid) {
            let period = i - first;
            tracing::debug!("platform repeats every {period} cycles from cycle {first}");
            return loads[first + (cycles - first) % period];
        }
        loads.push(north_load(&grid));
        seen.insert(grid.clone(), i);
        spin(&mut grid);
    }
    north_load(&grid)
}

pub fn day14(input: &str) -> Result<(usize, usize)> {
    let grid = Grid::parse(input)?;
    if let Some(at) = grid
        .positions()
        .find(|&p| !matches!(grid.get(p), Some(b'O' | b'#' | b'.')))
    {
        bail!(PuzzleError::UnexpectedCell {
            cell: char::from(grid.get(at).unwrap_or_default()),
            at,
        });
    }

    let mut tilted = grid.clone();
    tilt(&mut tilted, Point::UP);
    Ok((north_load(&tilted), load_after(grid, CYCLES)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        O....#....
        O.OO#....#
        .....##...
        OO.#O....O
        .O.....O#.
        O.#..O.#.#
        ..O..#O..O
        .......O..
        #....###..
        #OO..#....
    "};

    #[test]
    fn test_day14() -> Result<()> {
        assert_eq!(execute_day_input(day14, EXAMPLE)?, (136, 64));
        Ok(())
    }

    #[test]
    fn spin_cycles() -> Result<()> {
        let mut grid = Grid::parse(EXAMPLE)?;
        spin(&mut grid);
        let expected = indoc! {"
            .....#....
            ....#...O#
            ...OO##...
            .OO#......
            .....OOO#.
            .O#...O#.#
            ....O#....
            ......OOOO
            #...O###..
            #..OO#....
        "};
        assert_eq!(grid.to_string(), expected);
        Ok(())
    }

    #[test]
    fn tilt_stops_at_cube_rocks() -> Result<()> {
        let mut grid = Grid::parse("O#O.O\n")?;
        tilt(&mut grid, Point::RIGHT);
        assert_eq!(grid.to_string(), "O#.OO\n");
        tilt(&mut grid, Point::LEFT);
        assert_eq!(grid.to_string(), "O#OO.\n");
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/14.txt"]
    fn test_day14_input() -> Result<()> {
        assert_eq!(execute_day(14, day14, default_input)?, (110779, 86069));
        Ok(())
    }
}
