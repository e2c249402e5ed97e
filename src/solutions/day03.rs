use std::collections::BTreeMap;

use anyhow::Result;

use crate::{grid::Grid, parsing::parse_uint_from_bytes, point::Point};

/// A number in the schematic with the cells it covers on its row.
struct PartNumber {
    value: u64,
    row: i64,
    first: i64,
    last: i64,
}

impl PartNumber {
    /// The ring of cells around the number, clipped by the caller's lookups.
    fn surroundings(&self) -> impl Iterator<Item = Point> + '_ {
        (self.row - 1..=self.row + 1).flat_map(move |y| {
            (self.first - 1..=self.last + 1)
                .map(move |x| Point::new(x, y))
                .filter(move |p| p.y != self.row || p.x < self.first || p.x > self.last)
        })
    }
}

fn is_symbol(c: u8) -> bool {
    !c.is_ascii_digit() && c != b'.'
}

fn find_numbers(grid: &Grid) -> Vec<PartNumber> {
    let mut numbers = vec![];
    for y in 0..grid.height() {
        let row = grid.row(y);
        let mut x = 0;
        while x < row.len() {
            if !row[x].is_ascii_digit() {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x].is_ascii_digit() {
                x += 1;
            }
            numbers.push(PartNumber {
                value: parse_uint_from_bytes(&row[start..x]),
                row: y as i64,
                first: start as i64,
                last: x as i64 - 1,
            });
        }
    }
    numbers
}

pub fn day3(input: &str) -> Result<(u64, u64)> {
    let grid = Grid::parse(input)?;

    let mut part1 = 0;
    // ordered so gear traces come out in reading order
    let mut gears: BTreeMap<Point, Vec<u64>> = BTreeMap::new();
    for number in find_numbers(&grid) {
        let mut is_part = false;
        for pos in number.surroundings() {
            match grid.get(pos) {
                Some(b'*') => {
                    is_part = true;
                    gears.entry(pos).or_default().push(number.value);
                }
                Some(c) if is_symbol(c) => is_part = true,
                _ => {}
            }
        }
        if is_part {
            part1 += number.value;
        }
    }

    let part2: u64 = gears
        .iter()
        .filter(|(_, values)| values.len() == 2)
        .inspect(|(pos, values)| tracing::trace!("gear at {pos}: {values:?}"))
        .map(|(_, values)| values[0] * values[1])
        .sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    #[test]
    fn test_day3() -> Result<()> {
        let example = indoc! {"
            467..114..
            ...*......
            ..35..633.
            ......#...
            617*......
            .....+.58.
            ..592.....
            ......755.
            ...$.*....
            .664.598..
        "};
        assert_eq!(execute_day_input(day3, example)?, (4361, 467835));
        Ok(())
    }

    #[test]
    fn gear_needs_exactly_two_numbers() -> Result<()> {
        let three = indoc! {"
            2.3
            .*.
            4..
        "};
        assert_eq!(execute_day_input(day3, three)?, (9, 0));
        assert_eq!(execute_day_input(day3, "12*5\n")?, (17, 60));
        Ok(())
    }

    #[test]
    fn number_at_row_end_is_closed() -> Result<()> {
        assert_eq!(execute_day_input(day3, "..#\n.42\n")?, (42, 0));
        assert_eq!(execute_day_input(day3, "7")?, (0, 0));
        Ok(())
    }
}
