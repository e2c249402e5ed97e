use anyhow::{bail, Result};
use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, parsing};

struct Network<'a> {
    instructions: &'a [u8],
    nodes: FxHashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let lines = parsing::lines(input)?;
        let instructions = lines[0].trim().as_bytes();
        if let Some(&bad) = instructions.iter().find(|&&c| c != b'L' && c != b'R') {
            bail!(PuzzleError::malformed(0, format!("bad instruction {:?}", bad as char)));
        }

        let mut nodes = FxHashMap::default();
        for (index, line) in lines.iter().copied().enumerate().skip(1) {
            if line.is_empty() {
                continue;
            }
            // AAA = (BBB, CCC)
            let (name, targets) = parsing::split_once(line, " = ", index)?;
            let targets = targets
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .ok_or_else(|| PuzzleError::malformed(index, "expected (LEFT, RIGHT)"))?;
            let (left, right) = parsing::split_once(targets, ", ", index)?;
            nodes.insert(name, (left, right));
        }
        Ok(Self {
            instructions,
            nodes,
        })
    }

    /// Steps from `start` until `is_end` holds.
    fn steps(&self, start: &str, is_end: impl Fn(&str) -> bool) -> Result<u64> {
        // once every (node, instruction offset) pair has been seen the walk is looping
        let limit = self.instructions.len() * self.nodes.len();
        let mut place = start;
        for (step, dir) in self.instructions.iter().cycle().enumerate() {
            if is_end(place) {
                return Ok(step as u64);
            }
            if step > limit {
                break;
            }
            let Some(&(left, right)) = self.nodes.get(place) else {
                bail!("walked off the map at {place:?}");
            };
            place = if *dir == b'L' { left } else { right };
        }
        bail!(PuzzleError::NoPath)
    }

    fn camel_steps(&self) -> Result<u64> {
        self.steps("AAA", |place| place == "ZZZ")
    }

    /// Every ghost loops back on its own end node, so the paths line up at the LCM.
    fn ghost_steps(&self) -> Result<u64> {
        let mut starts: Vec<&str> = self
            .nodes
            .keys()
            .copied()
            .filter(|name| name.ends_with('A'))
            .collect();
        if starts.is_empty() {
            bail!("no node ends in 'A'");
        }
        starts.sort_unstable();
        starts.into_iter().try_fold(1, |acc: u64, start| -> Result<u64> {
            let steps = self.steps(start, |place| place.ends_with('Z'))?;
            tracing::debug!("ghost from {start} ends after {steps} steps");
            Ok(num::integer::lcm(acc, steps))
        })
    }
}

pub fn day8(input: &str) -> Result<(u64, u64)> {
    let network = Network::parse(input)?;
    Ok((network.camel_steps()?, network.ghost_steps()?))
}
