use adversarial_search::GameState;

use crate::ArenaState;

const OUTCOME_WEIGHT: f64 = 10_000.0;
const REMAINING_PELLET_WEIGHT: f64 = 4.0;
const PROXIMITY_WEIGHT: f64 = 10.0;
const DANGER_RADIUS: i32 = 3;
const DANGER_WEIGHT: f64 = 25.0;

/// A richer evaluation than the raw game score, meant to be handed to a search agent
///
/// Finished games are pushed far out of reach of anything the other terms can add up to, so the
/// search always prefers a guaranteed win and avoids a guaranteed loss. Otherwise the collector
/// is rewarded for being near a pellet, for having fewer left to eat, and penalized for every
/// chaser inside a small radius, more so the closer it is.
pub fn better_evaluation(state: &ArenaState) -> f64 {
    let score = state.score();

    if state.is_win() {
        return score + OUTCOME_WEIGHT;
    }
    if state.is_lose() {
        return score - OUTCOME_WEIGHT;
    }

    let proximity = state
        .nearest_pellet_distance()
        .map(|d| PROXIMITY_WEIGHT / (d as f64 + 1.0))
        .unwrap_or_default();

    let remaining = REMAINING_PELLET_WEIGHT * state.pellets().len() as f64;

    let collector = state.collector();
    let danger: f64 = state
        .chasers()
        .iter()
        .map(|c| c.manhattan_distance(&collector))
        .filter(|d| *d <= DANGER_RADIUS)
        .map(|d| {
            let closeness = (DANGER_RADIUS + 1 - d) as f64;
            DANGER_WEIGHT * closeness * closeness
        })
        .sum();

    score + proximity - remaining - danger
}
