//! Worklist traversals over puzzle state spaces.
//!
//! The state type carries the position plus whatever auxiliary data must not be revisited
//! redundantly (an entry direction, a run length, ...). Transition rules stay with the puzzle and
//! are passed in as `successors` closures.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
    hash::Hash,
};

use num::Zero;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::PuzzleError;

/// The container of not-yet-expanded states.
pub trait Frontier<T>: Default {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
}

/// Depth-first order.
impl<T> Frontier<T> for Vec<T> {
    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }
}

/// Breadth-first order.
impl<T> Frontier<T> for VecDeque<T> {
    fn push(&mut self, item: T) {
        self.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
}

/// Every state reachable from `starts`. The visiting order depends on `F`, the result does not.
pub fn explore<F, S, I>(
    starts: impl IntoIterator<Item = S>,
    mut successors: impl FnMut(&S) -> I,
) -> FxHashSet<S>
where
    F: Frontier<S>,
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let mut visited = FxHashSet::default();
    let mut frontier = F::default();
    for start in starts {
        frontier.push(start);
    }
    while let Some(state) = frontier.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }
        for next in successors(&state) {
            if !visited.contains(&next) {
                frontier.push(next);
            }
        }
    }
    visited
}

/// Breadth-first step counts from `start`, expanding no further than `limit` steps.
pub fn bfs_distances<S, I>(
    start: S,
    mut successors: impl FnMut(&S) -> I,
    limit: Option<usize>,
) -> FxHashMap<S, usize>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let mut distances = FxHashMap::default();
    distances.insert(start.clone(), 0);
    let mut queue = VecDeque::from([(start, 0)]);
    while let Some((state, steps)) = queue.pop_front() {
        if limit.is_some_and(|limit| steps >= limit) {
            continue;
        }
        for next in successors(&state) {
            if !distances.contains_key(&next) {
                distances.insert(next.clone(), steps + 1);
                queue.push_back((next, steps + 1));
            }
        }
    }
    distances
}

/// Lowest-cost path from any of `starts` to the first state satisfying `is_goal`.
///
/// Returns the goal state and its cost, or [`PuzzleError::NoPath`] once the frontier runs dry.
pub fn dijkstra<S, C, I>(
    starts: impl IntoIterator<Item = S>,
    mut successors: impl FnMut(&S) -> I,
    mut is_goal: impl FnMut(&S) -> bool,
) -> Result<(S, C), PuzzleError>
where
    S: Clone + Eq + Hash + Ord,
    C: Copy + Ord + Zero,
    I: IntoIterator<Item = (S, C)>,
{
    let mut best: FxHashMap<S, C> = FxHashMap::default();
    let mut heap = BinaryHeap::new();
    for start in starts {
        best.insert(start.clone(), C::zero());
        heap.push(Reverse((C::zero(), start)));
    }

    while let Some(Reverse((cost, state))) = heap.pop() {
        if is_goal(&state) {
            return Ok((state, cost));
        }
        if best.get(&state).is_some_and(|&known| known < cost) {
            continue;
        }
        for (next, step_cost) in successors(&state) {
            let next_cost = cost + step_cost;
            if best.get(&next).map_or(true, |&known| next_cost < known) {
                best.insert(next.clone(), next_cost);
                heap.push(Reverse((next_cost, next)));
            }
        }
    }
    Err(PuzzleError::NoPath)
}
