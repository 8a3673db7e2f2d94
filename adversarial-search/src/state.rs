use std::fmt::{self, Debug, Display};

/// Identifies one of the agents in a game. Agents move in ascending index order, starting over at
/// `0` after the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentIndex(pub usize);

impl AgentIndex {
    /// The agent we are searching on behalf of. This is always index `0`
    pub const CONTROLLED: AgentIndex = AgentIndex(0);

    /// Is this the controlled (maximizing) agent?
    pub fn is_controlled(&self) -> bool {
        self.0 == 0
    }

    /// The index as a `usize`, for indexing into per agent storage
    pub fn as_index(&self) -> usize {
        self.0
    }
}

impl Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent {}", self.0)
    }
}

/// An action one agent can take
///
/// Actions are compared for equality only. Every action vocabulary has a distinguished no-op,
/// which is what the search returns when it has nothing to choose between.
pub trait Action: Clone + Debug + PartialEq {
    /// The action that does nothing
    fn no_op() -> Self;
}

/// A fully observable snapshot of a game
///
/// States are treated as immutable. [GameState::successor] must return a new value and leave
/// `self` untouched.
pub trait GameState: Sized {
    /// The actions agents can take in this game
    type Action: Action;

    /// Number of agents in the game, including the controlled agent. Must stay fixed for the
    /// lifetime of a search
    fn num_agents(&self) -> usize;

    /// The legal actions for the given agent, in a stable order
    ///
    /// The order is the tie-break priority for the controlled agent and the enumeration order for
    /// adversaries. Passing an index outside `0..num_agents()` is a contract violation.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` takes `action`
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    /// Has the controlled agent won?
    fn is_win(&self) -> bool;

    /// Has the controlled agent lost?
    fn is_lose(&self) -> bool;

    /// The game's own score for this state
    fn score(&self) -> f64;

    /// A state is terminal when the game is won or lost
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
