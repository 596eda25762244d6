use crate::application_ports::Locator;
use crate::discord::{response, Error};
use domain_shared::discord::{GuildId, UserId};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::CreateInteractionResponse;
use poise::CreateReply;
use tracing::{info, instrument, warn};

#[instrument(level = "info", skip(ctx, interaction, _framework, locator))]
pub async fn handle_button_click<L: Locator>(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    _framework: poise::FrameworkContext<'_, L, Error>,
    locator: &L,
) -> Result<(), Error> {
    let Some(guild_id) = interaction.guild_id else {
        warn!(
            user_id = interaction.user.id.get(),
            "Role button clicked outside of a guild",
        );
        return respond(ctx, interaction, response::role_button::outside_guild()).await;
    };

    info!(
        guild_id = guild_id.get(),
        user_id = interaction.user.id.get(),
        custom_id = %interaction.data.custom_id,
        "User clicked on a role button.",
    );

    let role_button_port = locator.get_role_button_port();

    let response = match role_button_port
        .click_role_button(
            GuildId(guild_id.get()),
            UserId(interaction.user.id.get()),
            &interaction.data.custom_id,
        )
        .await
    {
        Ok(click) => response::role_button::click_applied(&click),
        Err(error) => {
            warn!(
                guild_id = guild_id.get(),
                user_id = interaction.user.id.get(),
                error = %error,
                "Role button click failed",
            );
            response::role_button::role_button_error(error)
        }
    };

    respond(ctx, interaction, response).await
}

#[instrument(level = "trace", skip_all)]
async fn respond(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    response: CreateReply,
) -> Result<(), Error> {
    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                response
                    .to_slash_initial_response(serenity::CreateInteractionResponseMessage::new()),
            ),
        )
        .await?;

    Ok(())
}
