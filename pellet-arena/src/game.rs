use adversarial_search::{AgentIndex, GameState};
use anyhow::{bail, ensure};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::{ArenaAgent, ArenaState, BoxedAgent, Direction, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
    /// Nobody finished before the round limit
    RoundLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub collector: String,
    pub outcome: Outcome,
    pub score: i64,
    pub rounds: usize,
    pub pellets_left: usize,
    pub collector_moves: Vec<Direction>,
}

/// Play one game to the end, or until `max_rounds` rounds have been played
///
/// Agents take turns in index order: the collector, then each chaser. `chasers[i]` plays agent
/// `i + 1`. Any agent returning an error or an illegal action ends the game with an error.
pub fn run_game(
    start: ArenaState,
    collector: &mut dyn ArenaAgent,
    chasers: &mut [BoxedAgent],
    max_rounds: usize,
) -> anyhow::Result<GameRecord> {
    ensure!(
        chasers.len() == start.chasers().len(),
        "the layout has {} chasers but {} chaser agents were provided",
        start.chasers().len(),
        chasers.len()
    );

    let span = info_span!("run_game", collector = %collector.name());
    let _guard = span.enter();

    let mut state = start;
    let mut collector_moves = vec![];
    let mut rounds = 0;

    while rounds < max_rounds && !state.is_terminal() {
        rounds += 1;

        for index in 0..state.num_agents() {
            if state.is_terminal() {
                break;
            }

            let agent = AgentIndex(index);
            let player: &mut dyn ArenaAgent = if agent.is_controlled() {
                &mut *collector
            } else {
                chasers[index - 1].as_mut()
            };

            let action = player.get_action(&state, agent)?;
            if !state.legal_actions(agent).contains(&action) {
                bail!(
                    "{} chose {action} for {agent}, which is not legal here",
                    player.name()
                );
            }

            if agent.is_controlled() {
                collector_moves.push(action);
            }
            state = state.successor(agent, &action);
        }

        debug!(rounds, score = state.points(), "round finished");
    }

    let outcome = match state.status() {
        Status::Won => Outcome::Won,
        Status::Lost => Outcome::Lost,
        Status::Playing => Outcome::RoundLimit,
    };

    let record = GameRecord {
        collector: collector.name(),
        outcome,
        score: state.points(),
        rounds,
        pellets_left: state.pellets().len(),
        collector_moves,
    };
    info!(
        outcome = ?record.outcome,
        score = record.score,
        rounds = record.rounds,
        "game over"
    );

    Ok(record)
}
