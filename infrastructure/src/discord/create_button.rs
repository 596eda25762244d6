use domain::ports::discord::{ButtonStyle, CreateActionRow, CreateButton};
use poise::serenity_prelude as serenity;
use tracing::warn;

pub fn domain_to_serenity_create_button(button: CreateButton) -> serenity::CreateButton {
    let CreateButton {
        label,
        emoji,
        style,
        button_id,
    } = button;

    let style = match style {
        ButtonStyle::Primary => serenity::ButtonStyle::Primary,
        ButtonStyle::Secondary => serenity::ButtonStyle::Secondary,
    };

    let create_button = serenity::CreateButton::new(button_id.0)
        .label(label)
        .style(style);

    match emoji.map(serenity::ReactionType::try_from) {
        Some(Ok(emoji)) => create_button.emoji(emoji),
        Some(Err(err)) => {
            warn!(error = %err, "Button emoji cannot be sent to Discord, leaving it out");
            create_button
        }
        None => create_button,
    }
}

pub fn domain_to_serenity_create_action_row(row: CreateActionRow) -> serenity::CreateActionRow {
    match row {
        CreateActionRow::Buttons { components } => serenity::CreateActionRow::Buttons(
            components
                .into_iter()
                .map(domain_to_serenity_create_button)
                .collect(),
        ),
    }
}
