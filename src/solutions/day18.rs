use anyhow::{bail, Result};

use crate::{error::PuzzleError, parsing, point::Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dig {
    dir: Point,
    len: i64,
}

fn parse_plan(input: &str) -> Result<Vec<(Dig, Dig)>> {
    parsing::lines(input)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| -> Result<(Dig, Dig)> {
            // R 6 (#70c710)
            let mut parts = line.split_whitespace();
            let (Some(dir), Some(len), Some(colour), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                bail!(PuzzleError::malformed(index, "expected \"<dir> <len> (#<colour>)\""));
            };
            let dir = match dir {
                "R" => Point::RIGHT,
                "D" => Point::DOWN,
                "L" => Point::LEFT,
                "U" => Point::UP,
                _ => bail!(PuzzleError::malformed(index, format!("bad direction {dir:?}"))),
            };
            let plain = Dig {
                dir,
                len: parsing::parse_with_context(len)?,
            };

            let Some(hex) = colour
                .strip_prefix("(#")
                .and_then(|c| c.strip_suffix(')'))
                .filter(|hex| hex.len() == 6 && hex.is_ascii())
            else {
                bail!(PuzzleError::malformed(index, format!("bad colour {colour:?}")));
            };
            let (len, dir) = hex.split_at(5);
            let dir = match dir {
                "0" => Point::RIGHT,
                "1" => Point::DOWN,
                "2" => Point::LEFT,
                "3" => Point::UP,
                _ => bail!(PuzzleError::malformed(index, format!("bad colour direction {dir:?}"))),
            };
            let colour = Dig {
                dir,
                len: i64::from_str_radix(len, 16)
                    .map_err(|e| PuzzleError::malformed(index, e.to_string()))?,
            };
            Ok((plain, colour))
        })
        .collect()
}

/// Cells covered by the trench and its interior: shoelace area plus Pick's theorem.
fn lagoon_size(plan: impl Iterator<Item = Dig>) -> Result<i64> {
    let mut pos = Point::ZERO;
    let mut twice_area = 0;
    let mut boundary = 0;
    for dig in plan {
        let next = pos + dig.dir * dig.len;
        twice_area += pos.x * next.y - next.x * pos.y;
        boundary += dig.len;
        pos = next;
    }
    if pos != Point::ZERO {
        bail!(PuzzleError::Impossible(format!(
            "dig plan ends at {pos}, not back at the start"
        )));
    }
    Ok((twice_area.abs() + boundary) / 2 + 1)
}

pub fn day18(input: &str) -> Result<(i64, i64)> {
    let plan = parse_plan(input)?;
    Ok((
        lagoon_size(plan.iter().map(|(plain, _)| *plain))?,
        lagoon_size(plan.iter().map(|(_, colour)| *colour))?,
    ))
}
