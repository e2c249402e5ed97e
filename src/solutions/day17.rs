use std::ops::RangeInclusive;

use anyhow::{bail, Result};

use crate::{error::PuzzleError, grid::Grid, point::Point, search};

/// Position plus whether the crucible arrived moving horizontally. The next run must turn.
type State = (Point, bool);

fn min_heat_loss(grid: &Grid, run: RangeInclusive<i64>) -> Result<u32> {
    let goal = Point::new(grid.width() as i64 - 1, grid.height() as i64 - 1);
    let successors = |&(pos, horizontal): &State| {
        let turns = if horizontal {
            [Point::UP, Point::DOWN]
        } else {
            [Point::LEFT, Point::RIGHT]
        };
        let mut next = vec![];
        for dir in turns {
            let mut loss = 0;
            for steps in 1..=*run.end() {
                let Some(heat) = grid.digit(pos + dir * steps) else {
                    break;
                };
                loss += heat;
                if run.contains(&steps) {
                    next.push(((pos + dir * steps, !horizontal), loss));
                }
            }
        }
        next
    };
    let (_, loss) = search::dijkstra(
        [(Point::ZERO, true), (Point::ZERO, false)],
        successors,
        |&(pos, _)| pos == goal,
    )?;
    Ok(loss)
}

pub fn day17(input: &str) -> Result<(u32, u32)> {
    let grid = Grid::parse(input)?;
    if let Some(at) = grid.positions().find(|&p| grid.digit(p).is_none()) {
        bail!(PuzzleError::UnexpectedCell {
            cell: char::from(grid.get(at).unwrap_or_default()),
            at,
        });
    }
    Ok((min_heat_loss(&grid, 1..=3)?, min_heat_loss(&grid, 4..=10)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    #[test]
    fn test_day17() -> Result<()> {
        let example = indoc! {"
            2413432311323
            3215453535623
            3255245654254
            3446585845452
            4546657867536
            1438598798454
            4457876987766
            3637877979653
            4654967986887
            4564679986453
            1224686865563
            2546548887735
            4322674655533
        "};
        assert_eq!(execute_day_input(day17, example)?, (102, 94));
        Ok(())
    }

    #[test]
    fn ultra_crucible_must_run_four() -> Result<()> {
        let example = indoc! {"
            111111111111
            999999999991
            999999999991
            999999999991
            999999999991
        "};
        let grid = Grid::parse(example)?;
        assert_eq!(min_heat_loss(&grid, 4..=10)?, 71);
        Ok(())
    }

    #[test]
    fn unreachable_goal_is_no_path() -> Result<()> {
        // a three-cell strip cannot be crossed in runs of at least four
        let grid = Grid::parse("111\n")?;
        let err = min_heat_loss(&grid, 4..=10).unwrap_err();
        assert_eq!(err.downcast_ref::<PuzzleError>(), Some(&PuzzleError::NoPath));
        assert_eq!(min_heat_loss(&grid, 1..=3)?, 2);
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/17.txt"]
    fn test_day17_input() -> Result<()> {
        assert_eq!(execute_day(17, day17, default_input)?, (694, 829));
        Ok(())
    }
}
