use crate::application_ports::Locator;
use domain::role_button::button_id::ROLE_BUTTON_ID_PREFIX;
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::{ClientBuilder, ComponentInteractionDataKind, Interaction};
use tracing::{info, instrument};

mod buttons;
pub mod commands;
mod response;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a, D> = poise::Context<'a, D, Error>;

pub async fn run_bot<L: Locator + Send + Sync + 'static>(
    locator: L,
    token: String,
    intents: serenity::GatewayIntents,
) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::enabled_commands(),
            event_handler: |ctx, event, framework, locator| {
                Box::pin(event_handler(ctx, event, framework, locator))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(
                    user = %ready.user.name,
                    guilds = ready.guilds.len(),
                    "Connected to Discord",
                );
                for guild in &ready.guilds {
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild.id)
                        .await?;
                }
                Ok(locator)
            })
        })
        .build();

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;

    Ok(())
}

#[instrument(level = "trace", skip_all)]
async fn event_handler<L: Locator>(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, L, Error>,
    locator: &L,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate {
            interaction: Interaction::Component(component_interaction),
        } => {
            if let ComponentInteractionDataKind::Button = component_interaction.data.kind {
                if component_interaction
                    .data
                    .custom_id
                    .starts_with(ROLE_BUTTON_ID_PREFIX)
                {
                    buttons::role_button::handle_button_click(
                        ctx,
                        component_interaction,
                        framework,
                        locator,
                    )
                    .await?
                }
            }
        }
        serenity::FullEvent::GuildCreate {
            guild,
            is_new: Some(true),
        } => {
            info!(guild_id = guild.id.get(), "Joined guild, registering commands");
            poise::builtins::register_in_guild(ctx, &framework.options.commands, guild.id).await?;
        }
        _ => {}
    }

    Ok(())
}
