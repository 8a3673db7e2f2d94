use std::time::Duration;

use color_eyre::eyre::Result;
use itertools::{Itertools, MinMaxResult};
use pellet_arena::{run_game, ArenaState, GameRecord, Outcome};
use tracing::info;

use crate::choices::{build_chasers, load_layout, Chasers, CollectorConfig, Evaluation, Strategy};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Builtin layout name (tiny, small, trapped, open) or a path to a layout file
    #[clap(short, long, value_parser, default_value = "small")]
    layout: String,

    /// How the collector picks its moves
    #[clap(short, long, value_enum, default_value_t = Strategy::AlphaBeta)]
    agent: Strategy,

    /// Search depth, in rounds
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// Evaluation function used at the search horizon
    #[clap(short, long, value_enum, default_value_t = Evaluation::Better)]
    evaluation: Evaluation,

    /// How the chasers move
    #[clap(short, long, value_enum, default_value_t = Chasers::Directional)]
    chasers: Chasers,

    /// Number of games to play
    #[clap(short, long, value_parser, default_value_t = 1)]
    games: u64,

    /// Seed for every random choice, so runs can be replayed
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// Stop a game after this many rounds
    #[clap(long, value_parser, default_value_t = 500)]
    max_rounds: usize,

    /// Deepen each search until this many milliseconds have passed, instead of searching
    /// straight to the given depth
    #[clap(long, value_parser)]
    budget_ms: Option<u64>,

    /// Print one JSON record per game instead of text
    #[clap(long)]
    json: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let layout = load_layout(&self.layout)?;

        let mut records: Vec<GameRecord> = Vec::with_capacity(self.games as usize);
        for game in 0..self.games {
            let seed = self.seed.wrapping_add(game * 1000);

            let mut collector = CollectorConfig {
                strategy: self.agent,
                evaluation: self.evaluation,
                depth: self.depth,
                budget: self.budget_ms.map(Duration::from_millis),
                seed,
            }
            .build();
            let mut chasers = build_chasers(self.chasers, layout.chasers.len(), seed);

            let record = run_game(
                ArenaState::from(&layout),
                collector.as_mut(),
                &mut chasers,
                self.max_rounds,
            )
            .map_err(|e| color_eyre::eyre::eyre!(e))?;

            if self.json {
                println!("{}", serde_json::to_string(&record)?);
            } else {
                println!(
                    "Game {}: {:?} with score {} after {} rounds",
                    game + 1,
                    record.outcome,
                    record.score,
                    record.rounds
                );
            }

            records.push(record);
        }

        let wins = records
            .iter()
            .filter(|r| r.outcome == Outcome::Won)
            .count();
        let average = records.iter().map(|r| r.score as f64).sum::<f64>() / records.len() as f64;
        let (worst, best) = match records.iter().map(|r| r.score).minmax() {
            MinMaxResult::NoElements => return Ok(()),
            MinMaxResult::OneElement(score) => (score, score),
            MinMaxResult::MinMax(worst, best) => (worst, best),
        };

        info!(
            games = records.len(),
            wins, average, worst, best, "finished playing"
        );
        if !self.json {
            println!(
                "Won {wins}/{}, average score {average:.1} (worst {worst}, best {best})",
                records.len()
            );
        }

        Ok(())
    }
}
