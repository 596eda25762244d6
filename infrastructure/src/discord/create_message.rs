use crate::discord::create_button::domain_to_serenity_create_action_row;
use crate::discord::create_embed::domain_to_serenity_create_embed;
use domain::ports::discord::CreateMessage;
use poise::serenity_prelude as serenity;

pub fn domain_to_serenity_create_message(message: CreateMessage) -> serenity::CreateMessage {
    let CreateMessage { embeds, action_rows } = message;

    serenity::CreateMessage::new()
        .embeds(embeds.into_iter().map(domain_to_serenity_create_embed).collect())
        .components(
            action_rows
                .into_iter()
                .map(domain_to_serenity_create_action_row)
                .collect(),
        )
}

/// Builds an edit that replaces the whole message, including its buttons.
pub fn domain_to_serenity_edit_message(message: CreateMessage) -> serenity::EditMessage {
    let CreateMessage { embeds, action_rows } = message;

    serenity::EditMessage::new()
        .embeds(embeds.into_iter().map(domain_to_serenity_create_embed).collect())
        .components(
            action_rows
                .into_iter()
                .map(domain_to_serenity_create_action_row)
                .collect(),
        )
}
