use anyhow::{bail, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, parsing};

const CATEGORIES: &[u8; 4] = b"xmas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

impl<'a> Target<'a> {
    fn new(name: &'a str) -> Self {
        match name {
            "A" => Target::Accept,
            "R" => Target::Reject,
            _ => Target::Workflow(name),
        }
    }
}

#[derive(Debug)]
struct Rule<'a> {
    category: usize,
    less_than: bool,
    value: u64,
    target: Target<'a>,
}

impl Rule<'_> {
    fn matches(&self, part: &[u64; 4]) -> bool {
        let rating = part[self.category];
        if self.less_than {
            rating < self.value
        } else {
            rating > self.value
        }
    }

    /// Splits an inclusive range into the part this rule sends on and the part it lets through.
    fn split(&self, (lo, hi): (u64, u64)) -> (Option<(u64, u64)>, Option<(u64, u64)>) {
        let nonempty = |(lo, hi): (u64, u64)| (lo <= hi).then_some((lo, hi));
        if self.less_than {
            (
                nonempty((lo, hi.min(self.value.saturating_sub(1)))),
                nonempty((lo.max(self.value), hi)),
            )
        } else {
            (
                nonempty((lo.max(self.value + 1), hi)),
                nonempty((lo, hi.min(self.value))),
            )
        }
    }
}

#[derive(Debug)]
struct Workflow<'a> {
    rules: Vec<Rule<'a>>,
    fallback: Target<'a>,
}

struct System<'a> {
    workflows: FxHashMap<&'a str, Workflow<'a>>,
    parts: Vec<[u64; 4]>,
}

impl<'a> System<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let workflow_re = Regex::new(r"^([a-z]+)\{(.*)\}$")?;
        let rule_re = Regex::new(r"^([xmas])([<>])([0-9]+):([a-zA-Z]+)$")?;
        let part_re = Regex::new(r"^\{x=([0-9]+),m=([0-9]+),a=([0-9]+),s=([0-9]+)\}$")?;

        let blocks = parsing::blocks(input)?;
        let [workflow_lines, part_lines] = blocks.as_slice() else {
            bail!("expected a block of workflows and a block of parts");
        };

        let mut workflows = FxHashMap::default();
        for (index, line) in workflow_lines.iter().copied().enumerate() {
            let caps = workflow_re
                .captures(line)
                .ok_or_else(|| PuzzleError::malformed(index, "expected name{rules}"))?;
            let (name, body) = match (caps.get(1), caps.get(2)) {
                (Some(name), Some(body)) => (name.as_str(), body.as_str()),
                _ => bail!(PuzzleError::malformed(index, "expected name{rules}")),
            };
            let mut steps: Vec<&str> = body.split(',').collect();
            let fallback = steps
                .pop()
                .filter(|last| !last.contains(':'))
                .ok_or_else(|| PuzzleError::malformed(index, "workflow lacks a fallback"))?;

            let rules = steps
                .into_iter()
                .map(|step| -> Result<Rule<'a>> {
                    let caps = rule_re
                        .captures(step)
                        .ok_or_else(|| PuzzleError::malformed(index, format!("bad rule {step:?}")))?;
                    let field = |i| caps.get(i).map_or("", |m| m.as_str());
                    Ok(Rule {
                        category: CATEGORIES
                            .iter()
                            .position(|&c| field(1).as_bytes() == [c])
                            .context("unknown category")?,
                        less_than: field(2) == "<",
                        value: parsing::parse_with_context(field(3))?,
                        target: Target::new(field(4)),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            workflows.insert(
                name,
                Workflow {
                    rules,
                    fallback: Target::new(fallback),
                },
            );
        }

        let parts = part_lines
            .iter()
            .copied()
            .enumerate()
            .map(|(index, line)| -> Result<[u64; 4]> {
                let caps = part_re
                    .captures(line)
                    .ok_or_else(|| PuzzleError::malformed(index, "expected {x=..,m=..,a=..,s=..}"))?;
                let mut part = [0; 4];
                for (i, rating) in part.iter_mut().enumerate() {
                    *rating = parsing::parse_with_context(caps.get(i + 1).map_or("", |m| m.as_str()))?;
                }
                Ok(part)
            })
            .collect::<Result<Vec<_>>>()?;

        if !workflows.contains_key("in") {
            bail!("no \"in\" workflow");
        }
        tracing::debug!("{} workflows, {} parts", workflows.len(), parts.len());
        Ok(Self { workflows, parts })
    }

    fn workflow(&self, name: &str) -> Result<&Workflow<'a>> {
        self.workflows
            .get(name)
            .with_context(|| format!("no workflow named {name:?}"))
    }

    fn accepts(&self, part: &[u64; 4]) -> Result<bool> {
        let mut target = Target::Workflow("in");
        // every workflow visited at most once, or the part is going round in circles
        for _ in 0..=self.workflows.len() {
            let name = match target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(name) => name,
            };
            let workflow = self.workflow(name)?;
            target = workflow
                .rules
                .iter()
                .find(|rule| rule.matches(part))
                .map_or(workflow.fallback, |rule| rule.target);
        }
        bail!(PuzzleError::Impossible(format!("part {part:?} loops forever")))
    }

    /// Combinations of ratings in `1..=4000` that end up accepted.
    fn accepted_combinations(&self) -> Result<u64> {
        let mut total = 0;
        let mut stack = vec![(Target::Workflow("in"), [(1, 4000); 4], 0)];
        while let Some((target, ranges, depth)) = stack.pop() {
            let name = match target {
                Target::Accept => {
                    total += ranges.iter().map(|(lo, hi)| hi - lo + 1).product::<u64>();
                    continue;
                }
                Target::Reject => continue,
                Target::Workflow(name) => name,
            };
            if depth > self.workflows.len() {
                bail!(PuzzleError::Impossible(format!("workflow {name:?} is part of a cycle")));
            }
            let workflow = self.workflow(name)?;
            let mut rest = Some(ranges);
            for rule in &workflow.rules {
                let Some(mut current) = rest else {
                    break;
                };
                let (taken, kept) = rule.split(current[rule.category]);
                if let Some(taken) = taken {
                    let mut sent = current;
                    sent[rule.category] = taken;
                    stack.push((rule.target, sent, depth + 1));
                }
                rest = kept.map(|kept| {
                    current[rule.category] = kept;
                    current
                });
            }
            if let Some(rest) = rest {
                stack.push((workflow.fallback, rest, depth + 1));
            }
        }
        Ok(total)
    }
}

pub fn day19(input: &str) -> Result<(u64, u64)> {
    let system = System::parse(input)?;
    let mut part1 = 0;
    for part in &system.parts {
        if system.accepts(part)? {
            part1 += part.iter().sum::<u64>();
        }
    }
    Ok((part1, system.accepted_combinations()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        px{a<2006:qkq,m>2090:A,rfg}
        pv{a>1716:R,A}
        lnx{m>1548:A,A}
        rfg{s<537:gd,x>2440:R,A}
        qs{s>3448:A,lnx}
        qkq{x<1416:A,crn}
        crn{x>2662:A,R}
        in{s<1351:px,qqz}
        qqz{s>2770:qs,m<1801:hdj,R}
        gd{a>3333:R,R}
        hdj{m>838:A,pv}

        {x=787,m=2655,a=1222,s=2876}
        {x=1679,m=44,a=2067,s=496}
        {x=2036,m=264,a=79,s=2244}
        {x=2461,m=1339,a=466,s=291}
        {x=2127,m=1623,a=2188,s=1013}
    "};

    #[test]
    fn test_day19() -> Result<()> {
        assert_eq!(execute_day_input(day19, EXAMPLE)?, (19114, 167409079868000));
        Ok(())
    }

    #[test]
    fn rules_split_ranges() {
        let less = Rule {
            category: 0,
            less_than: true,
            value: 10,
            target: Target::Accept,
        };
        assert_eq!(less.split((1, 20)), (Some((1, 9)), Some((10, 20))));
        assert_eq!(less.split((10, 20)), (None, Some((10, 20))));
        assert_eq!(less.split((1, 5)), (Some((1, 5)), None));

        let greater = Rule {
            less_than: false,
            ..less
        };
        assert_eq!(greater.split((1, 20)), (Some((11, 20)), Some((1, 10))));
        assert_eq!(greater.split((1, 10)), (None, Some((1, 10))));
    }

    #[test]
    fn everything_accepted() -> Result<()> {
        let system = System::parse("in{A}\n\n{x=1,m=2,a=3,s=4}\n")?;
        assert_eq!(system.accepted_combinations()?, 4000u64.pow(4));
        assert!(system.accepts(&[1, 2, 3, 4])?);
        Ok(())
    }

    #[test]
    fn cycles_are_reported() -> Result<()> {
        let system = System::parse("in{x<10:b,R}\nb{in}\n\n{x=1,m=1,a=1,s=1}\n")?;
        assert!(system.accepts(&[1, 1, 1, 1]).is_err());
        assert!(system.accepted_combinations().is_err());
        Ok(())
    }

    #[test]
    fn missing_workflow_is_an_error() {
        assert!(execute_day_input(day19, "in{a<5:zz,A}\n\n{x=1,m=1,a=1,s=1}\n").is_err());
        assert!(execute_day_input(day19, "qq{A}\n\n{x=1,m=1,a=1,s=1}\n").is_err());
    }
}
