use crate::args::CommonArgs;
use crate::locator::ApplicationPortLocator;
use anyhow::anyhow;
use application::role_button::RoleButtonService;
use clap::Args;
use infrastructure::discord::DiscordAdapter;
use infrastructure::role_button::JsonFileRoleButtonConfigRepository;
use poise::serenity_prelude as serenity;
use presentation::discord::run_bot;
use std::sync::Arc;
use tracing::instrument;

#[derive(Args)]
pub struct ServeArgs {
    /// The token for the Discord bot
    #[arg(long, env = "DISCORD_BOT_TOKEN")]
    pub discord_bot_token: String,
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ServeArgs) -> anyhow::Result<()> {
    let CommonArgs {
        role_buttons_file,
        sentry_dsn: _,
        sentry_environment: _,
        sentry_sample_rate: _,
        sentry_traces_sample_rate: _,
    } = common_args;
    let ServeArgs { discord_bot_token } = args;

    let intents = serenity::GatewayIntents::non_privileged();

    let role_button_config_repository =
        Arc::new(JsonFileRoleButtonConfigRepository::load(&role_buttons_file).await?);
    let serenity_client = Arc::new(serenity::Http::new(&discord_bot_token));

    let discord_adapter = Arc::new(DiscordAdapter::new(serenity_client));
    let role_button_adapter = Arc::new(RoleButtonService::new(
        discord_adapter,
        role_button_config_repository,
    ));

    let locator = ApplicationPortLocator::new(role_button_adapter);

    let bot = tokio::spawn(run_bot(locator, discord_bot_token, intents));

    bot.await?.map_err(|e| anyhow!(e))?;

    Ok(())
}
