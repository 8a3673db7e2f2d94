use std::{fs, time::Duration};

use adversarial_search::{
    search::{AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent},
    Evaluator, ScoreEvaluation,
};
use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr};
use pellet_arena::{
    better_evaluation, ArenaAgent, ArenaState, BoxedAgent, DirectionalChaser, Layout, RandomChaser,
    ReflexAgent, SearchingCollector,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Strategy {
    Minimax,
    AlphaBeta,
    Expectimax,
    /// One move lookahead with the reflex evaluation. Ignores depth and evaluation
    Reflex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Evaluation {
    /// The game's own score
    Score,
    /// Score plus pellet proximity and chaser danger
    Better,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Chasers {
    Random,
    Directional,
}

/// A builtin layout name, or a path to a layout file
pub(crate) fn load_layout(name_or_path: &str) -> Result<Layout> {
    if let Ok(layout) = Layout::builtin(name_or_path) {
        return Ok(layout);
    }

    let text = fs::read_to_string(name_or_path).wrap_err_with(|| {
        format!("{name_or_path} is neither a builtin layout nor a readable file")
    })?;

    text.parse()
        .wrap_err_with(|| format!("Couldn't parse the layout in {name_or_path}"))
}

pub(crate) struct CollectorConfig {
    pub strategy: Strategy,
    pub evaluation: Evaluation,
    pub depth: usize,
    pub budget: Option<Duration>,
    pub seed: u64,
}

impl CollectorConfig {
    pub(crate) fn build(&self) -> BoxedAgent {
        match self.evaluation {
            Evaluation::Score => self.build_with(ScoreEvaluation),
            Evaluation::Better => self.build_with(better_evaluation as fn(&ArenaState) -> f64),
        }
    }

    fn build_with<E>(&self, evaluator: E) -> BoxedAgent
    where
        E: Evaluator<ArenaState> + Clone + Send + 'static,
    {
        fn boxed<E, P>(collector: SearchingCollector<E, P>, budget: Option<Duration>) -> BoxedAgent
        where
            SearchingCollector<E, P>: ArenaAgent + Send + 'static,
        {
            match budget {
                Some(budget) => Box::new(collector.with_budget(budget)),
                None => Box::new(collector),
            }
        }

        match self.strategy {
            Strategy::Minimax => boxed(
                SearchingCollector::new(MinimaxAgent::new(evaluator, self.depth)),
                self.budget,
            ),
            Strategy::AlphaBeta => boxed(
                SearchingCollector::new(AlphaBetaAgent::new(evaluator, self.depth)),
                self.budget,
            ),
            Strategy::Expectimax => boxed(
                SearchingCollector::new(ExpectimaxAgent::new(evaluator, self.depth)),
                self.budget,
            ),
            Strategy::Reflex => Box::new(ReflexAgent::seeded(self.seed)),
        }
    }
}

/// One chaser agent per chaser on the board, each with its own seed
pub(crate) fn build_chasers(kind: Chasers, count: usize, seed: u64) -> Vec<BoxedAgent> {
    (0..count as u64)
        .map(|i| -> BoxedAgent {
            let seed = seed.wrapping_add(i + 1);
            match kind {
                Chasers::Random => Box::new(RandomChaser::seeded(seed)),
                Chasers::Directional => Box::new(DirectionalChaser::seeded(seed)),
            }
        })
        .collect()
}
