use std::{collections::BTreeSet, fmt, sync::Arc};

use adversarial_search::{AgentIndex, GameState};
use itertools::Itertools;
use serde::Serialize;

use crate::board::{Direction, Layout, Position, Walls};

pub const MOVE_COST: i64 = 1;
pub const PELLET_REWARD: i64 = 10;
pub const CLEAR_REWARD: i64 = 500;
pub const CAUGHT_PENALTY: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// A snapshot of a game in the arena. The collector is agent `0` and chaser `i` is agent `i + 1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArenaState {
    walls: Arc<Walls>,
    collector: Position,
    chasers: Vec<Position>,
    pellets: BTreeSet<Position>,
    score: i64,
    status: Status,
}

impl From<&Layout> for ArenaState {
    fn from(layout: &Layout) -> Self {
        Self {
            walls: layout.walls.clone(),
            collector: layout.collector,
            chasers: layout.chasers.clone(),
            pellets: layout.pellets.iter().copied().collect(),
            score: 0,
            status: Status::Playing,
        }
    }
}

impl ArenaState {
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn collector(&self) -> Position {
        self.collector
    }

    pub fn chasers(&self) -> &[Position] {
        &self.chasers
    }

    pub fn pellets(&self) -> &BTreeSet<Position> {
        &self.pellets
    }

    pub fn points(&self) -> i64 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Distance from the collector to the closest pellet, `None` once they are all eaten
    pub fn nearest_pellet_distance(&self) -> Option<i32> {
        self.pellets
            .iter()
            .map(|p| p.manhattan_distance(&self.collector))
            .min()
    }

    /// Distance from the collector to the closest chaser, `None` when there are no chasers
    pub fn nearest_chaser_distance(&self) -> Option<i32> {
        self.chasers
            .iter()
            .map(|c| c.manhattan_distance(&self.collector))
            .min()
    }

    fn agent_position(&self, agent: AgentIndex) -> Position {
        assert!(
            agent.as_index() < self.num_agents(),
            "{agent} is not in this game of {} agents",
            self.num_agents()
        );

        if agent.is_controlled() {
            self.collector
        } else {
            self.chasers[agent.as_index() - 1]
        }
    }

    fn check_caught(&mut self) {
        if self.chasers.contains(&self.collector) {
            self.score -= CAUGHT_PENALTY;
            self.status = Status::Lost;
        }
    }
}

impl GameState for ArenaState {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        self.chasers.len() + 1
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        let pos = self.agent_position(agent);

        if self.is_terminal() {
            return vec![];
        }

        let mut actions: Vec<Direction> = self.walls.open_moves(&pos).collect();
        if agent.is_controlled() || actions.is_empty() {
            actions.push(Direction::Stop);
        }

        actions
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let pos = self.agent_position(agent);
        assert!(!self.is_terminal(), "the game is over, {agent} can't move");

        let target = pos.step(*action);
        assert!(
            !self.walls.is_wall(&target),
            "{agent} can't move {action} into a wall"
        );

        let mut next = self.clone();

        if agent.is_controlled() {
            next.collector = target;
            next.score -= MOVE_COST;

            if next.pellets.remove(&target) {
                next.score += PELLET_REWARD;
            }

            next.check_caught();

            if next.status == Status::Playing && next.pellets.is_empty() {
                next.score += CLEAR_REWARD;
                next.status = Status::Won;
            }
        } else {
            next.chasers[agent.as_index() - 1] = target;
            next.check_caught();
        }

        next
    }

    fn is_win(&self) -> bool {
        self.status == Status::Won
    }

    fn is_lose(&self) -> bool {
        self.status == Status::Lost
    }

    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl ArenaState {
    fn cell(&self, pos: Position) -> char {
        let is_collector = pos == self.collector;

        if self.chasers.contains(&pos) {
            if is_collector {
                'X'
            } else {
                'G'
            }
        } else if is_collector {
            'P'
        } else if self.pellets.contains(&pos) {
            '.'
        } else if self.walls.is_wall(&pos) {
            '%'
        } else {
            ' '
        }
    }
}

impl fmt::Display for ArenaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = (0..self.walls.height())
            .map(|y| {
                (0..self.walls.width())
                    .map(|x| self.cell(Position::new(x, y)))
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{}\nscore: {}", board, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(layout: &str) -> ArenaState {
        ArenaState::from(&layout.parse::<Layout>().unwrap())
    }

    const CORRIDOR: &str = "
%%%%%%%
%. P G%
%%%%%%%
";

    #[test]
    fn test_collector_actions() {
        let state = state(CORRIDOR);

        assert_eq!(state.num_agents(), 2);
        assert_eq!(
            state.legal_actions(AgentIndex::CONTROLLED),
            vec![Direction::East, Direction::West, Direction::Stop]
        );
    }

    #[test]
    fn test_chaser_actions() {
        let state = state(CORRIDOR);

        assert_eq!(state.legal_actions(AgentIndex(1)), vec![Direction::West]);
    }

    #[test]
    fn test_boxed_in_chaser_can_only_stop() {
        let state = state("%%%%%\n%P.%G\n%%%%%");

        assert_eq!(state.legal_actions(AgentIndex(1)), vec![Direction::Stop]);
        let next = state.successor(AgentIndex(1), &Direction::Stop);
        assert_eq!(next.chasers(), &[Position::new(4, 1)]);
    }

    #[test]
    fn test_moving_costs_a_point() {
        let state = state(CORRIDOR);

        let next = state.successor(AgentIndex::CONTROLLED, &Direction::West);

        assert_eq!(next.collector(), Position::new(2, 1));
        assert_eq!(next.points(), -1);
        assert_eq!(next.status(), Status::Playing);
        // The input state is untouched
        assert_eq!(state.collector(), Position::new(3, 1));
        assert_eq!(state.points(), 0);
    }

    #[test]
    fn test_stopping_also_costs_a_point() {
        let state = state(CORRIDOR);

        let next = state.successor(AgentIndex::CONTROLLED, &Direction::Stop);

        assert_eq!(next.collector(), state.collector());
        assert_eq!(next.points(), -1);
    }

    #[test]
    fn test_eating_a_pellet() {
        let state = state("%%%%%%\n%P..G%\n%%%%%%");

        let next = state.successor(AgentIndex::CONTROLLED, &Direction::East);

        assert_eq!(next.points(), 9);
        assert_eq!(next.pellets().len(), 1);
        assert!(!next.is_terminal());
    }

    #[test]
    fn test_eating_the_last_pellet_wins() {
        let state = state("%%%%\n%P.%\n%%%%");

        let next = state.successor(AgentIndex::CONTROLLED, &Direction::East);

        assert_eq!(next.points(), 509);
        assert!(next.is_win());
        assert!(next.is_terminal());
        assert!(next.legal_actions(AgentIndex::CONTROLLED).is_empty());
    }

    #[test]
    fn test_chaser_catching_the_collector_loses() {
        let state = state("%%%%%%\n%.PG %\n%%%%%%");

        let next = state.successor(AgentIndex(1), &Direction::West);

        assert_eq!(next.points(), -500);
        assert!(next.is_lose());
        assert!(next.legal_actions(AgentIndex(1)).is_empty());
    }

    #[test]
    fn test_walking_into_a_chaser_loses() {
        let state = state("%%%%%%\n%.PG %\n%%%%%%");

        let next = state.successor(AgentIndex::CONTROLLED, &Direction::East);

        assert_eq!(next.points(), -501);
        assert!(next.is_lose());
    }

    #[test]
    fn test_caught_on_the_last_pellet_still_loses() {
        let state = state("%%%%%\n%P.G%\n%%%%%")
            .successor(AgentIndex(1), &Direction::West)
            .successor(AgentIndex::CONTROLLED, &Direction::East);

        assert!(state.pellets().is_empty());
        assert!(state.is_lose());
        assert!(!state.is_win());
        assert_eq!(state.points(), -491);
    }

    #[test]
    fn test_nearest_distances() {
        let state = state(CORRIDOR);

        assert_eq!(state.nearest_pellet_distance(), Some(2));
        assert_eq!(state.nearest_chaser_distance(), Some(2));

        let cleared = self::state("%%%%\n%P %\n%%%%");
        assert_eq!(cleared.nearest_pellet_distance(), None);
        assert_eq!(cleared.nearest_chaser_distance(), None);
    }

    #[test]
    #[should_panic(expected = "agent 2 is not in this game")]
    fn test_invalid_agent_panics() {
        state(CORRIDOR).legal_actions(AgentIndex(2));
    }

    #[test]
    #[should_panic(expected = "into a wall")]
    fn test_moving_into_a_wall_panics() {
        state(CORRIDOR).successor(AgentIndex::CONTROLLED, &Direction::North);
    }

    #[test]
    fn test_display() {
        let state = state(CORRIDOR);

        assert_eq!(state.to_string(), "%%%%%%%\n%. P G%\n%%%%%%%\nscore: 0");
    }

    #[test]
    fn test_equal_states_hash_alike() {
        use std::collections::HashSet;

        let state = state(CORRIDOR);
        let a = state
            .successor(AgentIndex::CONTROLLED, &Direction::West)
            .successor(AgentIndex::CONTROLLED, &Direction::East);
        let b = state
            .successor(AgentIndex::CONTROLLED, &Direction::Stop)
            .successor(AgentIndex::CONTROLLED, &Direction::Stop);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
