use anyhow::{bail, Result};

use crate::{error::PuzzleError, parsing};

/// Declared weakest first so the derived order ranks hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rules {
    Standard,
    /// `J` is the weakest card but counts as whatever makes the best type.
    Jokers,
}

const JACK: u8 = 11;

fn card_value(label: u8) -> Option<u8> {
    Some(match label {
        b'2'..=b'9' => label - b'0',
        b'T' => 10,
        b'J' => JACK,
        b'Q' => 12,
        b'K' => 13,
        b'A' => 14,
        _ => return None,
    })
}

#[derive(Debug, Clone)]
struct Hand {
    cards: [u8; 5],
    bid: u64,
}

impl Hand {
    fn hand_type(&self, rules: Rules) -> HandType {
        let mut counts = [0u8; 15];
        for &card in &self.cards {
            counts[card as usize] += 1;
        }
        let jokers = match rules {
            Rules::Jokers => std::mem::take(&mut counts[JACK as usize]),
            Rules::Standard => 0,
        };
        counts.sort_unstable_by(|a, b| b.cmp(a));
        let (first, second) = (counts[0] + jokers, counts[1]);
        match (first, second) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    /// Type first, then card by card.
    fn strength(&self, rules: Rules) -> (HandType, [u8; 5]) {
        let values = self.cards.map(|card| match (card, rules) {
            (JACK, Rules::Jokers) => 1,
            _ => card,
        });
        (self.hand_type(rules), values)
    }
}

fn parse_hands(input: &str) -> Result<Vec<Hand>> {
    parsing::lines(input)?
        .into_iter()
        .enumerate()
        .map(|(index, line)| -> Result<Hand> {
            let (labels, bid) = parsing::split_once(line, " ", index)?;
            let Ok(labels) = <[u8; 5]>::try_from(labels.as_bytes()) else {
                bail!(PuzzleError::malformed(index, "a hand has five cards"));
            };
            let mut cards = [0; 5];
            for (card, label) in cards.iter_mut().zip(labels) {
                *card = card_value(label).ok_or_else(|| {
                    PuzzleError::malformed(index, format!("bad card {:?}", label as char))
                })?;
            }
            Ok(Hand {
                cards,
                bid: parsing::parse_with_context(bid.trim())?,
            })
        })
        .collect()
}

fn total_winnings(hands: &[Hand], rules: Rules) -> u64 {
    let mut ranked: Vec<_> = hands.iter().map(|hand| (hand.strength(rules), hand.bid)).collect();
    ranked.sort_unstable();
    ranked
        .iter()
        .zip(1..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

pub fn day7(input: &str) -> Result<(u64, u64)> {
    let hands = parse_hands(input)?;
    Ok((
        total_winnings(&hands, Rules::Standard),
        total_winnings(&hands, Rules::Jokers),
    ))
}
