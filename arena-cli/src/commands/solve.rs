use adversarial_search::{
    search::{AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, SearchReturn},
    CountingInstruments, Evaluator, ScoreEvaluation, SearchError,
};
use color_eyre::eyre::Result;
use itertools::Itertools;
use pellet_arena::{better_evaluation, scored_actions, ArenaState, Direction};

use crate::choices::{load_layout, Evaluation, Strategy};

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Builtin layout name (tiny, small, trapped, open) or a path to a layout file
    #[clap(short, long, value_parser, default_value = "small")]
    layout: String,

    /// Which search to run
    #[clap(short, long, value_enum, default_value_t = Strategy::AlphaBeta)]
    strategy: Strategy,

    /// Search depth, in rounds
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// Evaluation function used at the search horizon
    #[clap(short, long, value_enum, default_value_t = Evaluation::Better)]
    evaluation: Evaluation,

    /// Print the whole explored tree
    #[clap(long)]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let state = ArenaState::from(&load_layout(&self.layout)?);
        println!("{state}\n");

        match self.evaluation {
            Evaluation::Score => self.search_with(&state, ScoreEvaluation),
            Evaluation::Better => self.search_with(&state, better_evaluation),
        }
    }

    fn search_with<E>(&self, state: &ArenaState, evaluator: E) -> Result<()>
    where
        E: Evaluator<ArenaState>,
    {
        let instruments = CountingInstruments::new();
        let result: Result<SearchReturn<Direction>, SearchError> = match self.strategy {
            Strategy::Minimax => MinimaxAgent::new(evaluator, self.depth)
                .search_with_instruments(state, &instruments),
            Strategy::AlphaBeta => AlphaBetaAgent::new(evaluator, self.depth)
                .search_with_instruments(state, &instruments),
            Strategy::Expectimax => ExpectimaxAgent::new(evaluator, self.depth)
                .search_with_instruments(state, &instruments),
            Strategy::Reflex => return explain_reflex(state),
        };
        let result = result?;

        println!(
            "Best action {} with value {}",
            result.best_action(),
            result.value()
        );
        println!(
            "Explored {} nodes, {} successors and {} leaves",
            result.explored_nodes(),
            instruments.successors(),
            instruments.leaves()
        );

        let route = result.chosen_route();
        if !route.is_empty() {
            println!(
                "Expected line: {}",
                route
                    .iter()
                    .map(|(agent, action)| format!("{agent} {action}"))
                    .join(", ")
            );
        }

        if self.tree {
            println!("\n{}", result.to_text_tree());
        }

        Ok(())
    }
}

fn explain_reflex(state: &ArenaState) -> Result<()> {
    for (action, value) in scored_actions(state) {
        println!("{action}: {value}");
    }

    Ok(())
}
