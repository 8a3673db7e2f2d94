use std::time::Duration;

use adversarial_search::{
    search::{AdversaryPolicy, SearchAgent},
    AgentIndex, Evaluator, GameState,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::{ArenaState, Direction};

/// Anything that can take a turn in the arena
pub trait ArenaAgent {
    fn name(&self) -> String;

    /// The action this agent takes in `state`, playing as `agent`
    fn get_action(&mut self, state: &ArenaState, agent: AgentIndex) -> anyhow::Result<Direction>;
}

pub type BoxedAgent = Box<dyn ArenaAgent + Send>;

/// Plays the collector with one of the adversarial searches
#[derive(Debug, Clone)]
pub struct SearchingCollector<E, P> {
    search: SearchAgent<E, P>,
    budget: Option<Duration>,
}

impl<E, P> SearchingCollector<E, P> {
    pub fn new(search: SearchAgent<E, P>) -> Self {
        Self {
            search,
            budget: None,
        }
    }

    /// Deepen the search one round at a time until `budget` runs out, instead of going straight
    /// to the configured depth
    pub fn with_budget(self, budget: Duration) -> Self {
        Self {
            budget: Some(budget),
            ..self
        }
    }
}

impl<E, P> ArenaAgent for SearchingCollector<E, P>
where
    E: Evaluator<ArenaState> + Clone + Send + 'static,
    P: AdversaryPolicy + Clone + Send + 'static,
{
    fn name(&self) -> String {
        P::NAME.to_owned()
    }

    fn get_action(&mut self, state: &ArenaState, agent: AgentIndex) -> anyhow::Result<Direction> {
        anyhow::ensure!(
            agent.is_controlled(),
            "{} only plays the collector, not {agent}",
            P::NAME
        );

        let action = match self.budget {
            Some(budget) => {
                let (depth, result) = self.search.deepened_until_timelimit(state, budget)?;
                debug!(depth, "deepened search finished");
                result.best_action()
            }
            None => self.search.choose_action(state)?,
        };

        Ok(action)
    }
}

/// A chaser that wanders, picking uniformly among its legal actions
#[derive(Debug, Clone)]
pub struct RandomChaser<R = StdRng> {
    rng: R,
}

impl RandomChaser<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> ArenaAgent for RandomChaser<R> {
    fn name(&self) -> String {
        "random".to_owned()
    }

    fn get_action(&mut self, state: &ArenaState, agent: AgentIndex) -> anyhow::Result<Direction> {
        let actions = state.legal_actions(agent);

        Ok(actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Stop))
    }
}

/// A chaser that usually heads for the collector
///
/// With probability `attack_probability` it picks among the moves that bring it closest to the
/// collector, otherwise among all of its legal moves.
#[derive(Debug, Clone)]
pub struct DirectionalChaser<R = StdRng> {
    rng: R,
    attack_probability: f64,
}

impl DirectionalChaser<StdRng> {
    pub const DEFAULT_ATTACK_PROBABILITY: f64 = 0.8;

    pub fn seeded(seed: u64) -> Self {
        Self::new(
            StdRng::seed_from_u64(seed),
            Self::DEFAULT_ATTACK_PROBABILITY,
        )
    }
}

impl<R: Rng> DirectionalChaser<R> {
    pub fn new(rng: R, attack_probability: f64) -> Self {
        Self {
            rng,
            attack_probability: attack_probability.clamp(0.0, 1.0),
        }
    }
}

impl<R: Rng> ArenaAgent for DirectionalChaser<R> {
    fn name(&self) -> String {
        "directional".to_owned()
    }

    fn get_action(&mut self, state: &ArenaState, agent: AgentIndex) -> anyhow::Result<Direction> {
        anyhow::ensure!(
            !agent.is_controlled(),
            "a chaser can't play the collector"
        );

        let actions = state.legal_actions(agent);
        let position = state.chasers()[agent.as_index() - 1];
        let target = state.collector();

        let distances: Vec<i32> = actions
            .iter()
            .map(|a| position.step(*a).manhattan_distance(&target))
            .collect();
        let closest = distances.iter().copied().min();
        let attacking: Vec<Direction> = actions
            .iter()
            .zip(&distances)
            .filter(|(_, d)| Some(**d) == closest)
            .map(|(a, _)| *a)
            .collect();

        let candidates = if self.rng.gen_bool(self.attack_probability) {
            &attacking
        } else {
            &actions
        };

        Ok(candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Stop))
    }
}
