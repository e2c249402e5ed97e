use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::parsing;

/// Number of winning numbers present on each card, in card order.
fn parse_matches(input: &str) -> Result<Vec<usize>> {
    parsing::lines(input)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| -> Result<usize> {
            // Card   1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
            let (_, numbers) = parsing::split_once(line, ":", index)?;
            let (winners, have) = parsing::split_once(numbers, "|", index)?;
            let winners: FxHashSet<u32> = parsing::numbers(winners)?.into_iter().collect();
            let have: Vec<u32> = parsing::numbers(have)?;
            Ok(have.iter().filter(|&n| winners.contains(n)).count())
        })
        .collect()
}

pub fn day4(input: &str) -> Result<(u64, u64)> {
    let matches = parse_matches(input)?;

    let part1 = matches
        .iter()
        .filter(|&&m| m > 0)
        .map(|&m| {
            u32::try_from(m - 1)
                .ok()
                .and_then(|shift| 1u64.checked_shl(shift))
                .with_context(|| format!("{m} matches are worth more than a u64"))
        })
        .sum::<Result<u64>>()?;

    let mut copies = vec![1u64; matches.len()];
    for (card, &m) in matches.iter().enumerate() {
        let won = copies[card];
        // cards never make you copy past the end of the table
        for copy in copies.iter_mut().skip(card + 1).take(m) {
            *copy += won;
        }
    }
    let part2: u64 = copies.iter().sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    #[test]
    fn test_day4() -> Result<()> {
        let example = indoc! {"
            Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
            Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
            Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
            Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
            Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
            Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
        "};
        assert_eq!(execute_day_input(day4, example)?, (13, 30));
        Ok(())
    }

    #[test]
    fn card_without_matches() -> Result<()> {
        assert_eq!(execute_day_input(day4, "Card 1: 1 2 | 3 4\n")?, (0, 1));
        Ok(())
    }

    #[test]
    fn too_many_matches_overflow() -> Result<()> {
        let card = |matches: u32| {
            let numbers = (1..=matches).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
            format!("Card 1: {numbers} | {numbers}\n")
        };
        assert_eq!(execute_day_input(day4, &card(64))?.0, 1 << 63);
        assert!(execute_day_input(day4, &card(65)).is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/04.txt"]
    fn test_day4_input() -> Result<()> {
        assert_eq!(execute_day(4, day4, default_input)?, (27845, 9496801));
        Ok(())
    }
}
