use std::collections::VecDeque;

use anyhow::{bail, Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{error::PuzzleError, grid, point::Point, search};

/// The two directions a pipe connects.
fn connections(cell: u8) -> Option<[Point; 2]> {
    Some(match cell {
        b'|' => [Point::UP, Point::DOWN],
        b'-' => [Point::LEFT, Point::RIGHT],
        b'L' => [Point::UP, Point::RIGHT],
        b'J' => [Point::UP, Point::LEFT],
        b'7' => [Point::DOWN, Point::LEFT],
        b'F' => [Point::DOWN, Point::RIGHT],
        _ => return None,
    })
}

struct Maze {
    pipes: FxHashMap<Point, [Point; 2]>,
    start: Point,
}

impl Maze {
    fn parse(input: &str) -> Result<Self> {
        let mut start = None;
        let pipes = grid::parse_sparse(input, |cell, at| match cell {
            b'.' => Ok(None),
            b'S' => {
                start = Some(at);
                Ok(None)
            }
            _ => connections(cell)
                .map(Some)
                .ok_or(PuzzleError::UnexpectedCell {
                    cell: char::from(cell),
                    at,
                }),
        })?;
        let mut maze = Maze {
            pipes,
            start: start.context("no start tile")?,
        };
        maze.resolve_start()?;
        Ok(maze)
    }

    fn connects(&self, from: Point, dir: Point) -> bool {
        self.pipes
            .get(&(from + dir))
            .is_some_and(|ends| ends.contains(&-dir))
    }

    /// Lays the only pipe under `S` that joins its two connecting neighbours.
    fn resolve_start(&mut self) -> Result<()> {
        let start = self.start;
        let dirs: Vec<Point> = Point::DIRECTIONS
            .into_iter()
            .filter(|&dir| self.connects(start, dir))
            .collect();
        let [a, b] = *dirs.as_slice() else {
            bail!(PuzzleError::Impossible(format!(
                "start at {start} connects in {} directions",
                dirs.len()
            )));
        };
        tracing::debug!("start {start} joins {a} and {b}");
        self.pipes.insert(start, [a, b]);
        Ok(())
    }

    fn find_loop(&self) -> Result<FxHashSet<Point>> {
        let tiles = search::explore::<VecDeque<_>, _, _>([self.start], |&pos| {
            self.pipes
                .get(&pos)
                .copied()
                .into_iter()
                .flatten()
                .map(move |dir| pos + dir)
        });
        for &pos in &tiles {
            let closed = self
                .pipes
                .get(&pos)
                .is_some_and(|ends| ends.iter().all(|&dir| self.connects(pos, dir)));
            if !closed {
                bail!(PuzzleError::Impossible(format!("loop is broken at {pos}")));
            }
        }
        Ok(tiles)
    }

    /// Scans each row, flipping inside/outside whenever a loop tile reaches up into the row above.
    fn enclosed(&self, tiles: &FxHashSet<Point>) -> Result<usize> {
        let Some(min) = tiles.iter().copied().reduce(|a, b| Point::new(a.x.min(b.x), a.y.min(b.y)))
        else {
            return Ok(0);
        };
        let max = tiles
            .iter()
            .fold(min, |a, b| Point::new(a.x.max(b.x), a.y.max(b.y)));

        let mut count = 0;
        for y in min.y..=max.y {
            let mut crossings = 0;
            for x in min.x..=max.x {
                let pos = Point::new(x, y);
                if tiles.contains(&pos) {
                    if self.pipes.get(&pos).is_some_and(|ends| ends.contains(&Point::UP)) {
                        crossings += 1;
                    }
                } else if crossings % 2 == 1 {
                    count += 1;
                }
            }
            if crossings % 2 != 0 {
                bail!(PuzzleError::Impossible(format!(
                    "row {y} crosses the loop {crossings} times"
                )));
            }
        }
        Ok(count)
    }
}

pub fn day10(input: &str) -> Result<(usize, usize)> {
    let maze = Maze::parse(input)?;
    let tiles = maze.find_loop()?;
    tracing::debug!("loop has {} tiles", tiles.len());
    Ok((tiles.len() / 2, maze.enclosed(&tiles)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    #[test]
    fn test_day10() -> Result<()> {
        let square = indoc! {"
            .....
            .S-7.
            .|.|.
            .L-J.
            .....
        "};
        assert_eq!(execute_day_input(day10, square)?, (4, 1));

        let complex = indoc! {"
            ..F7.
            .FJ|.
            SJ.L7
            |F--J
            LJ...
        "};
        assert_eq!(execute_day_input(day10, complex)?.0, 8);
        Ok(())
    }

    #[test]
    fn enclosed_tiles() -> Result<()> {
        let example = indoc! {"
            ...........
            .S-------7.
            .|F-----7|.
            .||.....||.
            .||.....||.
            .|L-7.F-J|.
            .|..|.|..|.
            .L--J.L--J.
            ...........
        "};
        assert_eq!(execute_day_input(day10, example)?.1, 4);

        let squeezed = indoc! {"
            ..........
            .S------7.
            .|F----7|.
            .||....||.
            .||....||.
            .|L-7F-J|.
            .|..||..|.
            .L--JL--J.
            ..........
        "};
        assert_eq!(execute_day_input(day10, squeezed)?.1, 4);
        Ok(())
    }

    #[test]
    fn start_is_resolved() -> Result<()> {
        let maze = Maze::parse("S-7\n|.|\nL-J\n")?;
        assert_eq!(maze.pipes[&Point::ZERO], [Point::RIGHT, Point::DOWN]);
        Ok(())
    }

    #[test]
    fn bad_mazes_are_rejected() {
        let err = execute_day_input(day10, "S-.\n...\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::Impossible(_))
        ));
        assert!(execute_day_input(day10, "...\n.-.\n").is_err());
        assert!(execute_day_input(day10, "S-7\n|x|\nL-J\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/10.txt"]
    fn test_day10_input() -> Result<()> {
        assert_eq!(execute_day(10, day10, default_input)?, (6882, 491));
        Ok(())
    }
}
