use std::{ops::ControlFlow, sync::mpsc};

use tracing::warn;

use crate::{Action, AgentIndex, Evaluator, GameState, SearchError, SearchInstruments};

use super::{AdversaryPolicy, LeafKind, SearchReturn};

/// Whose turn it is at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    Maximize,
    Adversary(AgentIndex),
}

/// Everything that stays fixed while walking the tree for one search
pub(crate) struct Traversal<'a, E, P, I> {
    pub(crate) evaluator: &'a E,
    pub(crate) policy: &'a P,
    pub(crate) instruments: &'a I,
    pub(crate) num_agents: usize,
    pub(crate) halt: Option<&'a mpsc::Receiver<()>>,
}

/// What a traversal builds at each node it finishes
///
/// [SearchReturn] keeps the whole explored tree. [Decision] keeps only the value and the chosen
/// action, so the children of a node are dropped as soon as it is finished
pub(crate) trait Record<A: Action>: Sized {
    fn leaf(value: f64, kind: LeafKind) -> Self;

    fn node(
        agent: AgentIndex,
        depth: usize,
        options: Vec<(A, Self)>,
        chosen: Option<usize>,
        value: f64,
        cutoff: bool,
    ) -> Self;

    fn value(&self) -> f64;
}

impl<A: Action> Record<A> for SearchReturn<A> {
    fn leaf(value: f64, kind: LeafKind) -> Self {
        SearchReturn::Leaf { value, kind }
    }

    fn node(
        agent: AgentIndex,
        depth: usize,
        options: Vec<(A, Self)>,
        chosen: Option<usize>,
        value: f64,
        cutoff: bool,
    ) -> Self {
        SearchReturn::Node {
            agent,
            depth,
            options,
            chosen,
            value,
            cutoff,
        }
    }

    fn value(&self) -> f64 {
        SearchReturn::value(self)
    }
}

/// The value of a node and the action picked there, if any
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Decision<A> {
    pub(crate) value: f64,
    pub(crate) action: Option<A>,
}

impl<A: Action> Record<A> for Decision<A> {
    fn leaf(value: f64, _kind: LeafKind) -> Self {
        Decision {
            value,
            action: None,
        }
    }

    fn node(
        _agent: AgentIndex,
        _depth: usize,
        options: Vec<(A, Self)>,
        chosen: Option<usize>,
        value: f64,
        _cutoff: bool,
    ) -> Self {
        let action = chosen
            .and_then(|i| options.into_iter().nth(i))
            .map(|(action, _)| action);

        Decision { value, action }
    }

    fn value(&self) -> f64 {
        self.value
    }
}

type StepResult<R> = Result<R, SearchError>;

impl<'a, E, P, I> Traversal<'a, E, P, I>
where
    P: AdversaryPolicy,
    I: SearchInstruments,
{
    /// Search `state` where it is `turn`'s move with `depth` full rounds left
    pub(crate) fn step<S, R>(
        &self,
        state: &S,
        turn: Turn,
        depth: usize,
        bounds: P::Bounds,
    ) -> StepResult<R>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Record<S::Action>,
    {
        // A dropped sender means whoever wanted the result is gone, so stop as well
        if let Some(halt) = self.halt {
            if !matches!(halt.try_recv(), Err(mpsc::TryRecvError::Empty)) {
                return Err(SearchError::Aborted);
            }
        }

        if depth == 0 || state.is_terminal() {
            return self.leaf(state, depth);
        }

        match turn {
            Turn::Maximize => self.maximize(state, depth, bounds),
            Turn::Adversary(agent) => self.adversary(state, agent, depth, bounds),
        }
    }

    fn leaf<S, R>(&self, state: &S, depth: usize) -> StepResult<R>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Record<S::Action>,
    {
        self.instruments.observe_leaf(depth);

        let value = self.evaluator.evaluate(state);
        if !value.is_finite() {
            return Err(SearchError::NonFiniteEvaluation { value });
        }

        // Win takes priority if a game ever reports both
        let kind = if state.is_win() {
            LeafKind::Win
        } else if state.is_lose() {
            LeafKind::Lose
        } else {
            LeafKind::Horizon
        };

        Ok(R::leaf(value, kind))
    }

    /// The turn after `agent` moves. Control returns to the controlled agent one round shallower
    /// after the last adversary, which with a single agent is straight after its own move
    fn next_turn(&self, agent: AgentIndex, depth: usize) -> (Turn, usize) {
        let next = agent.as_index() + 1;

        if next >= self.num_agents {
            (Turn::Maximize, depth - 1)
        } else {
            (Turn::Adversary(AgentIndex(next)), depth)
        }
    }

    fn maximize<S, R>(&self, state: &S, depth: usize, bounds: P::Bounds) -> StepResult<R>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Record<S::Action>,
    {
        let agent = AgentIndex::CONTROLLED;
        let actions = state.legal_actions(agent);

        if actions.is_empty() {
            return self.pass(state, agent, depth, bounds);
        }

        let (next_turn, next_depth) = self.next_turn(agent, depth);

        let mut bounds = bounds;
        let mut best = f64::NEG_INFINITY;
        let mut chosen = None;
        let mut options = Vec::with_capacity(actions.len());
        let mut cutoff = false;

        for action in actions {
            self.instruments.observe_successor(agent, depth);
            let next = state.successor(agent, &action);
            let result: R = self.step(&next, next_turn, next_depth, bounds)?;
            let value = result.value();
            options.push((action, result));

            // Strictly greater, so the first of several equal actions is kept
            if value > best {
                best = value;
                chosen = Some(options.len() - 1);
            }

            if let ControlFlow::Break(()) = self.policy.after_maximizing(best, &mut bounds) {
                cutoff = true;
                break;
            }
        }

        Ok(R::node(agent, depth, options, chosen, best, cutoff))
    }

    fn adversary<S, R>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        bounds: P::Bounds,
    ) -> StepResult<R>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Record<S::Action>,
    {
        let actions = state.legal_actions(agent);

        if actions.is_empty() {
            return self.pass(state, agent, depth, bounds);
        }

        let (next_turn, next_depth) = self.next_turn(agent, depth);

        let mut bounds = bounds;
        let mut acc = self.policy.begin();
        let mut options = Vec::with_capacity(actions.len());
        let mut cutoff = false;

        for action in actions {
            self.instruments.observe_successor(agent, depth);
            let next = state.successor(agent, &action);
            let result: R = self.step(&next, next_turn, next_depth, bounds)?;
            let value = result.value();
            options.push((action, result));

            if let ControlFlow::Break(()) = self.policy.accumulate(&mut acc, value, &mut bounds) {
                cutoff = true;
                break;
            }
        }

        let value = self.policy.finish(acc);
        let chosen = if self.policy.selects_branch() {
            options.iter().position(|(_, result)| result.value() == value)
        } else {
            None
        };

        Ok(R::node(agent, depth, options, chosen, value, cutoff))
    }

    /// An agent with no legal actions outside of a terminal state sits this turn out. This means
    /// the game disagrees with itself about whether the state is over, so it gets logged
    fn pass<S, R>(
        &self,
        state: &S,
        agent: AgentIndex,
        depth: usize,
        bounds: P::Bounds,
    ) -> StepResult<R>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Record<S::Action>,
    {
        warn!(%agent, depth, "No legal actions in a non terminal state, passing the turn");

        let (next_turn, next_depth) = self.next_turn(agent, depth);
        let result: R = self.step(state, next_turn, next_depth, bounds)?;
        let value = result.value();

        Ok(R::node(
            agent,
            depth,
            vec![(S::Action::no_op(), result)],
            Some(0),
            value,
            false,
        ))
    }
}
