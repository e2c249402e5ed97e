use std::collections::VecDeque;

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;

use crate::{error::PuzzleError, parsing};

/// Source of the pulse the button sends to the broadcaster.
const BUTTON: usize = usize::MAX;
const PRESS_LIMIT: u64 = 1 << 20;

#[derive(Debug, Clone)]
enum ModuleKind {
    Broadcast,
    FlipFlop(bool),
    /// Last pulse received from each input.
    Conjunction(FxHashMap<usize, bool>),
    Sink,
}

impl ModuleKind {
    /// The pulse sent to every output in response, if any.
    fn receive(&mut self, from: usize, high: bool) -> Option<bool> {
        match self {
            ModuleKind::Broadcast => Some(high),
            ModuleKind::FlipFlop(_) if high => None,
            ModuleKind::FlipFlop(on) => {
                *on = !*on;
                Some(*on)
            }
            ModuleKind::Conjunction(memory) => {
                memory.insert(from, high);
                Some(!memory.values().all(|&h| h))
            }
            ModuleKind::Sink => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Module<'a> {
    name: &'a str,
    kind: ModuleKind,
    outputs: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Machine<'a> {
    modules: Vec<Module<'a>>,
    index: FxHashMap<&'a str, usize>,
    broadcaster: usize,
}

impl<'a> Machine<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let mut machine = Machine {
            modules: vec![],
            index: FxHashMap::default(),
            broadcaster: 0,
        };
        let mut wiring = vec![];
        for (line_index, line) in parsing::lines(input)?.into_iter().enumerate() {
            // %a -> inv, con
            let (name, outputs) = parsing::split_once(line, " -> ", line_index)?;
            let (kind, name) = if name == "broadcaster" {
                (ModuleKind::Broadcast, name)
            } else if let Some(name) = name.strip_prefix('%') {
                (ModuleKind::FlipFlop(false), name)
            } else if let Some(name) = name.strip_prefix('&') {
                (ModuleKind::Conjunction(FxHashMap::default()), name)
            } else {
                bail!(PuzzleError::malformed(line_index, format!("unknown module {name:?}")));
            };
            if machine.index.contains_key(name) {
                bail!(PuzzleError::malformed(line_index, format!("{name:?} declared twice")));
            }
            wiring.push((machine.add(name, kind), outputs));
        }

        for (id, outputs) in wiring {
            for output in outputs.split(',').map(str::trim) {
                let target = match machine.index.get(output) {
                    Some(&target) => target,
                    None => machine.add(output, ModuleKind::Sink),
                };
                machine.modules[id].outputs.push(target);
                if let ModuleKind::Conjunction(memory) = &mut machine.modules[target].kind {
                    memory.insert(id, false);
                }
            }
        }
        machine.broadcaster = *machine.index.get("broadcaster").context("no broadcaster")?;
        Ok(machine)
    }

    fn add(&mut self, name: &'a str, kind: ModuleKind) -> usize {
        let id = self.modules.len();
        self.modules.push(Module {
            name,
            kind,
            outputs: vec![],
        });
        self.index.insert(name, id);
        id
    }

    /// Presses the button once, reporting every pulse as `(from, high, to)` in delivery order.
    fn press(&mut self, mut observe: impl FnMut(usize, bool, usize)) {
        let mut queue = VecDeque::from([(BUTTON, false, self.broadcaster)]);
        while let Some((from, high, to)) = queue.pop_front() {
            observe(from, high, to);
            let module = &mut self.modules[to];
            if let Some(sent) = module.kind.receive(from, high) {
                queue.extend(module.outputs.iter().map(|&next| (to, sent, next)));
            }
        }
    }

    fn inputs_of(&self, target: usize) -> Vec<usize> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, module)| module.outputs.contains(&target))
            .map(|(id, _)| id)
            .collect()
    }
}

fn pulse_product(mut machine: Machine) -> u64 {
    let (mut low, mut high) = (0, 0);
    for _ in 0..1000 {
        machine.press(|_, is_high, _| {
            if is_high {
                high += 1;
            } else {
                low += 1;
            }
        });
    }
    low * high
}

/// `rx` hangs off a single conjunction, so it sees a low pulse once every feeder of that
/// conjunction sends high in the same press. The feeders run on independent cycles.
fn presses_until_rx(mut machine: Machine) -> Result<u64> {
    let rx = *machine.index.get("rx").context("no rx module")?;
    let hub = match *machine.inputs_of(rx).as_slice() {
        [hub] if matches!(machine.modules[hub].kind, ModuleKind::Conjunction(_)) => hub,
        _ => bail!(PuzzleError::Impossible(
            "rx is not fed by a single conjunction".to_string()
        )),
    };
    let feeders = machine.inputs_of(hub);
    if feeders.is_empty() {
        bail!(PuzzleError::Impossible(format!(
            "{} has no inputs",
            machine.modules[hub].name
        )));
    }

    let mut first_high: FxHashMap<usize, u64> = FxHashMap::default();
    for presses in 1..=PRESS_LIMIT {
        machine.press(|from, high, to| {
            if high && to == hub {
                first_high.entry(from).or_insert(presses);
            }
        });
        if first_high.len() == feeders.len() {
            for (&feeder, presses) in &first_high {
                tracing::debug!("{} cycles every {presses} presses", machine.modules[feeder].name);
            }
            return Ok(first_high.values().fold(1, |acc, &p| num::integer::lcm(acc, p)));
        }
    }
    bail!(PuzzleError::NoPath)
}

pub fn day20(input: &str) -> Result<(u64, u64)> {
    let machine = Machine::parse(input)?;
    Ok((pulse_product(machine.clone()), presses_until_rx(machine)?))
}
