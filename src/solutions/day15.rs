use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::parsing;

fn hash(s: &str) -> usize {
    s.bytes()
        .fold(0, |acc, b| (acc + usize::from(b)) * 17 % 256)
}

enum Step<'a> {
    Remove(&'a str),
    Insert(&'a str, u8),
}

fn parse_step(step: &str) -> Result<Step<'_>> {
    if let Some(label) = step.strip_suffix('-') {
        return Ok(Step::Remove(label));
    }
    match step.split_once('=') {
        Some((label, focal)) => Ok(Step::Insert(label, parsing::parse_with_context(focal)?)),
        None => bail!("step {step:?} neither removes nor inserts a lens"),
    }
}

/// Boxes keep their lenses in insertion order; replacing a lens keeps its slot.
fn focusing_power(steps: &[&str]) -> Result<usize> {
    let mut boxes: Vec<IndexMap<&str, u8>> = vec![IndexMap::new(); 256];
    for step in steps {
        match parse_step(step)? {
            Step::Remove(label) => {
                boxes[hash(label)].shift_remove(label);
            }
            Step::Insert(label, focal) => {
                boxes[hash(label)].insert(label, focal);
            }
        }
    }
    Ok(boxes
        .iter()
        .zip(1..)
        .flat_map(|(lenses, box_number)| {
            lenses
                .values()
                .zip(1..)
                .map(move |(&focal, slot)| box_number * slot * usize::from(focal))
        })
        .sum())
}

pub fn day15(input: &str) -> Result<(usize, usize)> {
    let steps: Vec<&str> = parsing::non_empty(input)?
        .split(',')
        .map(str::trim)
        .collect();
    let part1 = steps.iter().map(|step| hash(step)).sum();
    Ok((part1, focusing_power(&steps)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_day15() -> Result<()> {
        let example = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";
        assert_eq!(execute_day_input(day15, example)?, (1320, 145));
        Ok(())
    }

    #[test]
    fn hash_values() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn"), 0);
        assert_eq!(hash("qp"), 1);
        assert_eq!(hash(""), 0);
    }

    #[test]
    fn replacing_keeps_the_slot() -> Result<()> {
        // rn and cm share box 0
        assert_eq!(focusing_power(&["rn=1", "cm=2", "rn=3"])?, 3 + 2 * 2);
        assert_eq!(focusing_power(&["rn=1", "cm=2", "rn-", "rn=3"])?, 2 + 2 * 3);
        assert!(focusing_power(&["rn"]).is_err());
        Ok(())
    }

    #[test]
    #[ignore = "needs inputs/15.txt"]
    fn test_day15_input() -> Result<()> {
        assert_eq!(execute_day(15, day15, default_input)?, (495972, 245223));
        Ok(())
    }
}
