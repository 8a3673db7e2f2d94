use std::{fmt::Debug, hash::Hash, sync::Arc};

use dashmap::DashMap;

use crate::GameState;

/// This trait is used for anything that can turn a game state into a desirability estimate
///
/// Higher is better for the controlled agent. The value must be finite, the search refuses to
/// compare NaN or infinities. Nothing else is assumed about how the estimate is computed.
///
/// Any `Fn(&S) -> f64` is an evaluator, so plain functions and closures can be passed directly.
pub trait Evaluator<S> {
    /// Estimate how good `state` is for the controlled agent
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, FnLike: Fn(&S) -> f64> Evaluator<S> for FnLike {
    fn evaluate(&self, state: &S) -> f64 {
        (self)(state)
    }
}

/// The default evaluation function, which is just the game's own score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl<S: GameState> Evaluator<S> for ScoreEvaluation {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

/// Cache the evaluation of each state
///
/// The cache is shared between clones, so one cache can back several searches, including ones
/// running on other threads.
#[derive(Clone)]
pub struct CachedEvaluation<E, S>
where
    S: Eq + Hash,
{
    evaluator: E,
    cache: Arc<DashMap<S, f64>>,
}

impl<E, S> CachedEvaluation<E, S>
where
    E: Evaluator<S>,
    S: Eq + Hash + Clone,
{
    /// Wrap `evaluator` with a new, empty cache
    pub fn new(evaluator: E) -> Self {
        Self::with_cache(evaluator, Arc::new(DashMap::new()))
    }

    /// Wrap `evaluator` using an existing cache
    pub fn with_cache(evaluator: E, cache: Arc<DashMap<S, f64>>) -> Self {
        Self { evaluator, cache }
    }

    /// Number of states currently cached
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<E, S> Evaluator<S> for CachedEvaluation<E, S>
where
    E: Evaluator<S>,
    S: Eq + Hash + Clone,
{
    fn evaluate(&self, state: &S) -> f64 {
        if let Some(value) = self.cache.get(state) {
            return *value;
        }

        let value = self.evaluator.evaluate(state);
        self.cache.insert(state.clone(), value);
        value
    }
}

impl<E, S> Debug for CachedEvaluation<E, S>
where
    S: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEvaluation")
            .field("cached_states", &self.cache.len())
            .finish_non_exhaustive()
    }
}
