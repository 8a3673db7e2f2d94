use adversarial_search::{AgentIndex, GameState};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::{ArenaAgent, ArenaState, Direction};

const DANGER_PENALTY: f64 = 1000.0;
const PELLET_HORIZON: f64 = 20.0;
const EATING_BONUS: f64 = 100.0;

/// Scores the collector taking `action` from `current`, looking one move ahead only
///
/// The successor's score, minus a large penalty when a chaser is within one step of the new
/// position, plus a bonus for being close to a pellet and another for having just eaten one.
pub fn reflex_evaluation(current: &ArenaState, action: Direction) -> f64 {
    let successor = current.successor(AgentIndex::CONTROLLED, &action);
    let position = successor.collector();

    let mut value = successor.score();

    if successor
        .chasers()
        .iter()
        .any(|c| c.manhattan_distance(&position) < 2)
    {
        value -= DANGER_PENALTY;
    }

    // Clearing the board counts as standing on a pellet
    let nearest = successor.nearest_pellet_distance().unwrap_or(0);
    value += PELLET_HORIZON - nearest as f64;

    if successor.pellets().len() < current.pellets().len() {
        value += EATING_BONUS;
    }

    value
}

/// Every legal collector action with its value, in legal action order
pub fn scored_actions(state: &ArenaState) -> Vec<(Direction, f64)> {
    state
        .legal_actions(AgentIndex::CONTROLLED)
        .into_iter()
        .map(|action| (action, reflex_evaluation(state, action)))
        .collect()
}

/// A collector that picks whichever action scores best under [reflex_evaluation], breaking ties
/// at random
#[derive(Debug, Clone)]
pub struct ReflexAgent<R = StdRng> {
    rng: R,
}

impl ReflexAgent<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ReflexAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn choose_action(&mut self, state: &ArenaState) -> Direction {
        let scored = scored_actions(state);

        let best = scored
            .iter()
            .map(|(_, value)| *value)
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<Direction> = scored
            .iter()
            .filter(|(_, value)| *value == best)
            .map(|(action, _)| *action)
            .collect();

        let chosen = tied
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Stop);
        debug!(?scored, %chosen, "reflex choice");

        chosen
    }
}

impl<R: Rng> ArenaAgent for ReflexAgent<R> {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn get_action(&mut self, state: &ArenaState, agent: AgentIndex) -> anyhow::Result<Direction> {
        anyhow::ensure!(
            agent.is_controlled(),
            "the reflex agent only plays the collector, not {agent}"
        );

        Ok(self.choose_action(state))
    }
}
