use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::AgentIndex;

/// Hooks the traversal calls as it explores the game tree
///
/// Both methods default to doing nothing.
pub trait SearchInstruments {
    /// Called right before a successor state is generated for `agent` at `depth`
    fn observe_successor(&self, _agent: AgentIndex, _depth: usize) {}

    /// Called when a leaf is evaluated, with the remaining depth at that leaf
    fn observe_leaf(&self, _depth: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// Any empty struct that implements [SearchInstruments] as a no-op, for when you don't want to
/// observe the search
pub struct Instruments {}

impl SearchInstruments for Instruments {}

/// Counts what the traversal did
///
/// Counters are atomics so the same instruments can be shared with a search running on another
/// thread.
#[derive(Debug, Default)]
pub struct CountingInstruments {
    successors: AtomicUsize,
    leaves: AtomicUsize,
    controlled_depths: Mutex<BTreeSet<usize>>,
}

impl CountingInstruments {
    /// Fresh counters, all at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// How many successor states were generated
    pub fn successors(&self) -> usize {
        self.successors.load(Ordering::Relaxed)
    }

    /// How many leaves were evaluated
    pub fn leaves(&self) -> usize {
        self.leaves.load(Ordering::Relaxed)
    }

    /// Every remaining depth at which the controlled agent generated a successor
    pub fn controlled_depths(&self) -> Vec<usize> {
        self.controlled_depths.lock().iter().copied().collect()
    }
}

impl SearchInstruments for CountingInstruments {
    fn observe_successor(&self, agent: AgentIndex, depth: usize) {
        self.successors.fetch_add(1, Ordering::Relaxed);

        if agent.is_controlled() {
            self.controlled_depths.lock().insert(depth);
        }
    }

    fn observe_leaf(&self, _depth: usize) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }
}
