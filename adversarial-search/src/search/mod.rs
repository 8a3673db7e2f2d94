//! The search agents. A [SearchAgent] is configured once with an evaluation function and a depth,
//! and then asked for an action for as many states as you like.
//!
//! Depth is counted in rounds, where one round is the controlled agent's move followed by every
//! adversary's move. At depth `d` the controlled agent moves `d` times along every path that
//! doesn't end the game early.
//!
//! All three strategies share one traversal. The controlled agent always maximizes, and an
//! [AdversaryPolicy] decides what the other agents do:
//!
//! - [Minimize]: the adversaries minimize, which is classic minimax generalized to any number of
//!   adversaries
//! - [AlphaBeta]: the same thing with alpha-beta pruning. Always picks the same action as
//!   [Minimize] while generating at most as many successor states
//! - [Expectation]: every adversary picks uniformly at random, so adversary nodes average their
//!   children (expectimax)
//!
//! Ties between actions of the controlled agent go to whichever the game listed first.

use std::{fmt::Debug, sync::mpsc, time::Duration};

use derivative::Derivative;
use tracing::info_span;

use crate::{Action, Evaluator, GameState, Instruments, SearchError, SearchInstruments};

mod policy;
pub use policy::{AdversaryPolicy, AlphaBeta, Expectation, Mean, Minimize, Window};

mod search_return;
pub use search_return::{LeafKind, SearchReturn};

mod traversal;
use traversal::{Decision, Record, Traversal, Turn};

mod deepening;

/// A search agent using plain minimax
pub type MinimaxAgent<E> = SearchAgent<E, Minimize>;

/// A search agent using minimax with alpha-beta pruning
pub type AlphaBetaAgent<E> = SearchAgent<E, AlphaBeta>;

/// A search agent modeling adversaries as uniformly random (expectimax)
pub type ExpectimaxAgent<E> = SearchAgent<E, Expectation>;

#[derive(Debug, Clone, Copy)]
/// Optional properties that can be defined for a [SearchAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use std::time::Duration;
/// use adversarial_search::search::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.time_padding, Duration::from_millis(10));
/// ```
pub struct SearchOptions {
    /// How much of a time budget to hold back when searching against the clock
    ///
    /// Used by [SearchAgent::deepened_until_timelimit] so the answer is ready slightly before the
    /// budget runs out
    ///
    /// Defaults to 10 milliseconds
    pub time_padding: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            time_padding: Duration::from_millis(10),
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "P: Debug"))]
/// This is the struct that wraps an evaluation function, a depth and a strategy, and can be
/// used to pick actions
///
/// It also outputs traces using the [tracing] crate.
pub struct SearchAgent<E, P> {
    #[derivative(Debug = "ignore")]
    evaluator: E,
    depth: usize,
    policy: P,
    options: SearchOptions,
}

impl<E, P> SearchAgent<E, P>
where
    P: AdversaryPolicy + Default,
{
    /// Construct a new `SearchAgent` that searches `depth` rounds deep
    ///
    /// ```rust
    /// use adversarial_search::{search::AlphaBetaAgent, ScoreEvaluation};
    ///
    /// let agent = AlphaBetaAgent::new(ScoreEvaluation, 3);
    ///
    /// assert_eq!(agent.depth(), 3);
    /// ```
    pub fn new(evaluator: E, depth: usize) -> Self {
        Self::new_with_options(evaluator, depth, Default::default())
    }

    /// Construct a new `SearchAgent` providing a set of [SearchOptions]
    ///
    /// [SearchOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    pub fn new_with_options(evaluator: E, depth: usize, options: SearchOptions) -> Self {
        Self {
            evaluator,
            depth,
            policy: P::default(),
            options,
        }
    }
}

impl<E, P> SearchAgent<E, P>
where
    P: AdversaryPolicy,
{
    /// The configured depth, in rounds
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The evaluation function leaves are scored with
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The options this agent was built with
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Pick the controlled agent's action for `state`
    ///
    /// Returns the no-op action when `state` is already over or the configured depth is zero.
    ///
    /// Unlike [SearchAgent::search] this doesn't keep the explored tree around, so memory only
    /// grows with the depth of the search.
    pub fn choose_action<S>(&self, state: &S) -> Result<S::Action, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        info_span!(
            "choose_action",
            strategy = P::NAME,
            depth = self.depth,
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let decision: Decision<S::Action> =
                self.traverse(state, self.depth, &Instruments {}, None)?;
            let action = decision.action.unwrap_or_else(<S::Action as Action>::no_op);

            let current_span = tracing::Span::current();
            current_span.record("chosen_value", decision.value);
            current_span.record("chosen_action", format!("{:?}", action).as_str());

            Ok(action)
        })
    }

    /// This runs the search to the configured depth, returning a struct that contains all the
    /// information about the tree we searched.
    ///
    /// The return value is a recursive struct that tells you the value of the root, and the
    /// value of every node below it that was explored.
    pub fn search<S>(&self, state: &S) -> Result<SearchReturn<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.search_with_instruments(state, &Instruments {})
    }

    /// Same as [SearchAgent::search] but reports what the traversal does to `instruments`
    pub fn search_with_instruments<S, I>(
        &self,
        state: &S,
        instruments: &I,
    ) -> Result<SearchReturn<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
        I: SearchInstruments,
    {
        self.search_to_depth(state, self.depth, instruments, None)
    }

    pub(crate) fn search_to_depth<S, I>(
        &self,
        state: &S,
        depth: usize,
        instruments: &I,
        halt: Option<&mpsc::Receiver<()>>,
    ) -> Result<SearchReturn<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
        I: SearchInstruments,
    {
        self.traverse(state, depth, instruments, halt)
    }

    fn traverse<S, I, R>(
        &self,
        state: &S,
        depth: usize,
        instruments: &I,
        halt: Option<&mpsc::Receiver<()>>,
    ) -> Result<R, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
        I: SearchInstruments,
        R: Record<S::Action>,
    {
        let num_agents = state.num_agents();
        if num_agents == 0 {
            return Err(SearchError::NoAgents);
        }

        let traversal = Traversal {
            evaluator: &self.evaluator,
            policy: &self.policy,
            instruments,
            num_agents,
            halt,
        };

        traversal.step(state, Turn::Maximize, depth, self.policy.root_bounds())
    }
}
