use crate::args::CommonArgs;
use clap::Args;
use domain::ports::discord::RoleId;
use domain::role_button::message::create_role_buttons_message;
use domain::role_button::RoleButtonConfig;
use infrastructure::role_button::JsonFileRoleButtonConfigRepository;
use tracing::{info, instrument, warn};

#[derive(Args, Debug)]
pub struct CheckArgs {}

#[instrument(level = "info", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: CheckArgs) -> anyhow::Result<()> {
    let CommonArgs {
        role_buttons_file, ..
    } = common_args;
    let CheckArgs {} = args;

    let repository = JsonFileRoleButtonConfigRepository::load(&role_buttons_file).await?;

    for (guild_id, config) in repository.all().await {
        info!(
            guild_id = guild_id.0,
            buttons = config.roles().len(),
            exclusive = config.exclusive_group().len(),
            message_id = config.message().map(|message| message.message_id.0),
            "Guild role buttons",
        );

        let skipped_roles = skipped_roles(&config);
        if !skipped_roles.is_empty() {
            warn!(
                guild_id = guild_id.0,
                skipped_roles = ?skipped_roles,
                "Some buttons break Discord's limits and will be left out of the message",
            );
        }
    }

    info!(path = %repository.path().display(), "Role button file is valid");

    Ok(())
}

/// Buttons that would be left out of the message even if every role existed.
fn skipped_roles(config: &RoleButtonConfig) -> Vec<RoleId> {
    let configured_roles = config.roles().keys().copied().collect();
    create_role_buttons_message(config, &configured_roles).skipped_roles
}
