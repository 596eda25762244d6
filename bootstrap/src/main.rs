mod args;
mod command;
mod locator;
mod logging;

use crate::args::CommonArgs;
use crate::command::Command;
use clap::Parser;

#[derive(Parser)]
#[command(name = "role-buttons-bot", version, about = "Discord bot for self-assignable role buttons")]
struct Cli {
    #[command(flatten)]
    common_args: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let Cli {
        common_args,
        command,
    } = Cli::parse();

    let _sentry_guard = logging::init(&common_args);

    command.run(common_args).await
}
