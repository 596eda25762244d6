use crate::application_ports::Locator;
use crate::discord::{response, Context, Error};
use domain_shared::discord::{ChannelId, GuildId};
use tracing::{info, instrument, warn};

/// Send the role button message to this channel
#[poise::command(
    slash_command,
    rename = "sendrolebuttons",
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn command<D: Sync + Locator>(ctx: Context<'_, D>) -> Result<(), Error> {
    send_role_buttons(ctx).await
}

/// Create the role button message in this channel
#[poise::command(
    slash_command,
    rename = "initroles",
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn init_roles_command<D: Sync + Locator>(ctx: Context<'_, D>) -> Result<(), Error> {
    send_role_buttons(ctx).await
}

#[instrument(level = "info", skip(ctx))]
async fn send_role_buttons<D: Sync + Locator>(ctx: Context<'_, D>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("Command should be run only in guilds")?;
    info!(
        guild_id = guild_id.get(),
        channel_id = ctx.channel_id().get(),
        user_id = ctx.author().id.get(),
        "Sending role button message",
    );

    ctx.defer_ephemeral().await?;

    let role_button_port = ctx.data().get_role_button_port();

    let reply = match role_button_port
        .send_role_buttons(GuildId(guild_id.get()), ChannelId(ctx.channel_id().get()))
        .await
    {
        Ok(refresh) => {
            response::role_button::buttons_updated("✅ Role button message created.", &refresh)
        }
        Err(error) => {
            warn!(error = %error, "Failed to send role button message");
            response::role_button::role_button_error(error)
        }
    };

    ctx.send(reply).await?;

    Ok(())
}
