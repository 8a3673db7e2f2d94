use std::{fmt::Debug, ops::ControlFlow};

/// How adversary nodes combine the values of their children, and what bound state (if any) gets
/// threaded through the tree
///
/// The traversal is the same for every strategy: the controlled agent always maximizes, and the
/// policy decides everything that differs between minimax, alpha-beta and expectimax.
pub trait AdversaryPolicy {
    /// State passed down from a node to its children. Always copied, never shared between siblings
    type Bounds: Copy + Debug;

    /// Running aggregate of the children of one adversary node
    type Accumulator;

    /// Short name used in traces
    const NAME: &'static str;

    /// The bounds the root is searched with
    fn root_bounds(&self) -> Self::Bounds;

    /// Called after each child of a maximizing node with the best value seen so far. Breaking
    /// skips the remaining children
    fn after_maximizing(&self, _best: f64, _bounds: &mut Self::Bounds) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// A fresh accumulator for an adversary node
    fn begin(&self) -> Self::Accumulator;

    /// Fold one child value into the accumulator. Breaking skips the remaining children
    fn accumulate(
        &self,
        acc: &mut Self::Accumulator,
        value: f64,
        bounds: &mut Self::Bounds,
    ) -> ControlFlow<()>;

    /// The value of the adversary node. Only called after at least one child was accumulated
    fn finish(&self, acc: Self::Accumulator) -> f64;

    /// Whether adversary nodes pick a single branch (minimizing) rather than averaging them
    fn selects_branch(&self) -> bool;
}

/// Plain minimax: adversaries pick the child with the lowest value
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimize;

impl AdversaryPolicy for Minimize {
    type Bounds = ();
    type Accumulator = f64;

    const NAME: &'static str = "minimax";

    fn root_bounds(&self) -> Self::Bounds {}

    fn begin(&self) -> f64 {
        f64::INFINITY
    }

    fn accumulate(&self, acc: &mut f64, value: f64, _bounds: &mut ()) -> ControlFlow<()> {
        if value < *acc {
            *acc = value;
        }

        ControlFlow::Continue(())
    }

    fn finish(&self, acc: f64) -> f64 {
        acc
    }

    fn selects_branch(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The alpha-beta window
pub struct Window {
    /// The best value the maximizer can already guarantee on the path to this node
    pub alpha: f64,
    /// The best value the minimizer can already guarantee on the path to this node
    pub beta: f64,
}

impl Window {
    /// The widest window, nothing is known yet
    pub fn unbounded() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

/// Minimax with alpha-beta pruning
///
/// Cutoffs use strict comparisons, so the chosen action always matches [Minimize], ties included.
/// Values returned from pruned nodes are bounds rather than exact values, which is fine since
/// they are only ever compared against the window that caused the prune.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBeta;

impl AdversaryPolicy for AlphaBeta {
    type Bounds = Window;
    type Accumulator = f64;

    const NAME: &'static str = "alpha_beta";

    fn root_bounds(&self) -> Window {
        Window::unbounded()
    }

    fn after_maximizing(&self, best: f64, bounds: &mut Window) -> ControlFlow<()> {
        if best > bounds.beta {
            return ControlFlow::Break(());
        }

        bounds.alpha = bounds.alpha.max(best);
        ControlFlow::Continue(())
    }

    fn begin(&self) -> f64 {
        f64::INFINITY
    }

    fn accumulate(&self, acc: &mut f64, value: f64, bounds: &mut Window) -> ControlFlow<()> {
        if value < *acc {
            *acc = value;
        }

        if *acc < bounds.alpha {
            return ControlFlow::Break(());
        }

        bounds.beta = bounds.beta.min(*acc);
        ControlFlow::Continue(())
    }

    fn finish(&self, acc: f64) -> f64 {
        acc
    }

    fn selects_branch(&self) -> bool {
        true
    }
}

/// Expectimax: adversaries choose uniformly at random, so their value is the mean of their
/// children. Nothing can be pruned
#[derive(Debug, Clone, Copy, Default)]
pub struct Expectation;

#[derive(Debug, Clone, Copy, Default)]
/// Sum and count of the children seen so far
pub struct Mean {
    sum: f64,
    count: usize,
}

impl AdversaryPolicy for Expectation {
    type Bounds = ();
    type Accumulator = Mean;

    const NAME: &'static str = "expectimax";

    fn root_bounds(&self) -> Self::Bounds {}

    fn begin(&self) -> Mean {
        Mean::default()
    }

    fn accumulate(&self, acc: &mut Mean, value: f64, _bounds: &mut ()) -> ControlFlow<()> {
        acc.sum += value;
        acc.count += 1;

        ControlFlow::Continue(())
    }

    fn finish(&self, acc: Mean) -> f64 {
        debug_assert!(acc.count > 0, "expectation over zero children");

        acc.sum / acc.count as f64
    }

    fn selects_branch(&self) -> bool {
        false
    }
}
