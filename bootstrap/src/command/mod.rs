pub mod check;
pub mod serve;

use crate::args::CommonArgs;
use crate::command::check::CheckArgs;
use crate::command::serve::ServeArgs;
use clap::Subcommand;
use tracing::instrument;

#[derive(Subcommand)]
pub enum Command {
    /// Run the bot
    #[command(name = "serve")]
    Serve(ServeArgs),
    /// Validate the role button file and print a summary
    #[command(name = "check")]
    Check(CheckArgs),
}

impl Command {
    #[instrument(level = "trace", skip(self, common_args))]
    pub async fn run(self, common_args: CommonArgs) -> anyhow::Result<()> {
        match self {
            Command::Serve(args) => serve::run(common_args, args).await,
            Command::Check(args) => check::run(common_args, args).await,
        }
    }
}
