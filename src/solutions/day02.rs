use anyhow::{bail, Result};

use crate::{error::PuzzleError, parsing};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    const BAG: Cubes = Cubes {
        red: 12,
        green: 13,
        blue: 14,
    };

    fn fits_in(&self, bag: &Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

struct Game {
    id: u32,
    draws: Vec<Cubes>,
}

fn parse_game(line: &str, index: usize) -> Result<Game> {
    // Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green
    let (head, draws) = parsing::split_once(line, ": ", index)?;
    let id = match head.strip_prefix("Game ") {
        Some(id) => parsing::parse_with_context(id)?,
        None => bail!(PuzzleError::malformed(index, "expected \"Game <id>\"")),
    };

    let mut game = Game { id, draws: vec![] };
    for draw in draws.split("; ") {
        let mut cubes = Cubes::default();
        for count in draw.split(", ") {
            let (n, colour) = parsing::split_once(count, " ", index)?;
            let n = parsing::parse_with_context(n)?;
            match colour {
                "red" => cubes.red = n,
                "green" => cubes.green = n,
                "blue" => cubes.blue = n,
                _ => bail!(PuzzleError::malformed(index, format!("unknown colour {colour:?}"))),
            }
        }
        game.draws.push(cubes);
    }
    Ok(game)
}

pub fn day2(input: &str) -> Result<(u32, u32)> {
    let games = parsing::lines(input)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_game(line, index))
        .collect::<Result<Vec<_>>>()?;

    let part1: u32 = games
        .iter()
        .filter(|game| game.draws.iter().all(|draw| draw.fits_in(&Cubes::BAG)))
        .map(|game| game.id)
        .sum();

    let part2: u32 = games
        .iter()
        .map(|game| {
            game.draws
                .iter()
                .fold(Cubes::default(), |acc, &draw| acc.max(draw))
                .power()
        })
        .sum();

    Ok((part1, part2))
}
