pub mod play;
pub mod solve;

use play::Play;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play full games and report how the collector did
    Play(Play),
    /// Search a single position and explain the decision
    Solve(Solve),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Solve(s) => s.run()?,
        }

        Ok(())
    }
}
