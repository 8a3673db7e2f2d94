//! A small grid game to put the adversarial search to work
//!
//! A collector wanders a walled board eating pellets while one or more chasers try to land on
//! it. The collector is always agent `0`, so any search agent from `adversarial_search` can play
//! it directly, and the game's score is exactly what the search maximizes.

mod board;
pub use board::{Direction, Layout, LayoutError, Position, Walls, BUILTIN_LAYOUTS};

mod state;
pub use state::{ArenaState, Status, CAUGHT_PENALTY, CLEAR_REWARD, MOVE_COST, PELLET_REWARD};

mod agents;
pub use agents::{ArenaAgent, BoxedAgent, DirectionalChaser, RandomChaser, SearchingCollector};

mod reflex;
pub use reflex::{reflex_evaluation, scored_actions, ReflexAgent};

mod heuristics;
pub use heuristics::better_evaluation;

mod game;
pub use game::{run_game, GameRecord, Outcome};
