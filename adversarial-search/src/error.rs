use thiserror::Error;

/// Errors that can occur during a search.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchError {
    /// The game state reported zero agents, so there is nobody to search for
    #[error("game state has no agents")]
    NoAgents,

    /// The evaluation function returned NaN or an infinity.
    ///
    /// This is never replaced with a default, since a made up value would corrupt every
    /// comparison above it in the tree
    #[error("evaluation function returned a non-finite value: {value}")]
    NonFiniteEvaluation {
        #[allow(missing_docs)]
        value: f64,
    },

    /// The search was told to stop before it finished. A partial search has no valid result
    #[error("search was halted before it completed")]
    Aborted,

    /// A time limited search ran out of time before completing even a single depth
    #[error("no search depth completed within the time limit")]
    NoCompletedSearch,
}
