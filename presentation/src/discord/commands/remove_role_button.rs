use crate::application_ports::Locator;
use crate::discord::{response, Context, Error};
use domain_shared::discord::{GuildId, RoleId};
use poise::serenity_prelude as serenity;
use tracing::{info, instrument, warn};

/// Remove the button of a role
#[poise::command(
    slash_command,
    rename = "removerolebutton",
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
#[instrument(level = "info", skip(ctx))]
pub async fn command<D: Sync + Locator>(
    ctx: Context<'_, D>,
    #[description = "Role whose button should be removed"] role: serenity::Role,
) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("Command should be run only in guilds")?;
    info!(
        guild_id = guild_id.get(),
        user_id = ctx.author().id.get(),
        role_id = role.id.get(),
        "Removing role button",
    );

    ctx.defer_ephemeral().await?;

    let role_button_port = ctx.data().get_role_button_port();

    let reply = match role_button_port
        .remove_role_button(GuildId(guild_id.get()), RoleId(role.id.get()))
        .await
    {
        Ok(refresh) => response::role_button::buttons_updated(
            format!("🗑️ Button for `{}` removed.", role.name),
            &refresh,
        ),
        Err(error) => {
            warn!(error = %error, "Failed to remove role button");
            response::role_button::role_button_error(error)
        }
    };

    ctx.send(reply).await?;

    Ok(())
}
