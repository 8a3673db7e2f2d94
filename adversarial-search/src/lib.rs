#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements multi-agent adversarial search. You provide a game state that knows how
//! to enumerate and apply actions for each agent, and an evaluation function that turns a state
//! into a finite `f64`. The search picks the action for the controlled agent (agent `0`).
//!
//! Three strategies share a single traversal:
//!
//! - [search::Minimize]: plain minimax, every adversary minimizes the controlled agent's value
//! - [search::AlphaBeta]: the same answer as minimax, with alpha-beta pruning
//! - [search::Expectation]: expectimax, every adversary picks uniformly at random
//!
//! ```rust
//! use adversarial_search::{search::MinimaxAgent, Action, AgentIndex, GameState, ScoreEvaluation};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Pick(u8);
//!
//! impl Action for Pick {
//!     fn no_op() -> Self {
//!         Pick(0)
//!     }
//! }
//!
//! // A one round game: the controlled agent picks a number, the opponent subtracts 1 or 2
//! #[derive(Debug, Clone)]
//! struct Countdown {
//!     total: i64,
//!     moves: usize,
//! }
//!
//! impl GameState for Countdown {
//!     type Action = Pick;
//!
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//!
//!     fn legal_actions(&self, _agent: AgentIndex) -> Vec<Pick> {
//!         if self.moves >= 2 {
//!             return vec![];
//!         }
//!         vec![Pick(1), Pick(2)]
//!     }
//!
//!     fn successor(&self, agent: AgentIndex, action: &Pick) -> Self {
//!         let delta = if agent.is_controlled() { 3 * action.0 as i64 } else { -(action.0 as i64) };
//!         Countdown { total: self.total + delta, moves: self.moves + 1 }
//!     }
//!
//!     fn is_win(&self) -> bool {
//!         false
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         false
//!     }
//!
//!     fn score(&self) -> f64 {
//!         self.total as f64
//!     }
//! }
//!
//! let agent = MinimaxAgent::new(ScoreEvaluation, 1);
//! let action = agent.choose_action(&Countdown { total: 0, moves: 0 }).unwrap();
//!
//! assert_eq!(action, Pick(2));
//! ```

mod error;
pub use error::SearchError;

mod state;
pub use state::{Action, AgentIndex, GameState};

mod evaluation;
pub use evaluation::{CachedEvaluation, Evaluator, ScoreEvaluation};

mod instruments;
pub use instruments::{CountingInstruments, Instruments, SearchInstruments};

pub mod search;

#[cfg(test)]
pub(crate) mod test_game;
