use crate::ports::discord::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateMessage, MAX_BUTTONS_PER_ROW,
};
use crate::role_button::button_id::role_button_id;
use crate::role_button::{valid_emoji, valid_label, RoleButtonConfig, MAX_BUTTONS};
use domain_shared::discord::RoleId;
use std::collections::BTreeSet;
use tracing::{instrument, warn};

pub const EMBED_TITLE: &str = "Choose your role";
pub const EMBED_DESCRIPTION: &str = "Click a button to get or remove a role.";
pub const EXCLUSIVE_HINT: &str = "You can only hold one of the highlighted roles at a time.";
const BLURPLE: u32 = 0x5865F2;

#[derive(Debug)]
pub struct RoleButtonsMessage {
    pub message: CreateMessage,
    /// Configured roles that no longer exist in the guild and were skipped.
    pub missing_roles: Vec<RoleId>,
    /// Buttons Discord would reject, either for their label or because the
    /// message already holds [`MAX_BUTTONS`] buttons.
    pub skipped_roles: Vec<RoleId>,
}

/// Renders the role button message for `config`.
///
/// Buttons are laid out in ascending role id order, five per row. Roles not
/// present in `existing_roles` are left out and reported in `missing_roles`.
/// Stored buttons that break the label or button limits are left out and
/// reported in `skipped_roles`, so the message always stays sendable.
#[instrument(level = "trace", skip(config, existing_roles))]
pub fn create_role_buttons_message(
    config: &RoleButtonConfig,
    existing_roles: &BTreeSet<RoleId>,
) -> RoleButtonsMessage {
    let mut buttons = Vec::with_capacity(config.roles().len().min(MAX_BUTTONS));
    let mut missing_roles = Vec::new();
    let mut skipped_roles = Vec::new();

    for (role_id, button) in config.roles() {
        if !existing_roles.contains(role_id) {
            warn!(
                role_id = role_id.0,
                "Configured role no longer exists, skipping its button",
            );
            missing_roles.push(*role_id);
            continue;
        }

        let Some(label) = valid_label(&button.label) else {
            warn!(role_id = role_id.0, "Button label is empty or too long, skipping it");
            skipped_roles.push(*role_id);
            continue;
        };

        if buttons.len() >= MAX_BUTTONS {
            warn!(
                role_id = role_id.0,
                "Message already holds {MAX_BUTTONS} buttons, skipping the rest",
            );
            skipped_roles.push(*role_id);
            continue;
        }

        let style = if config.is_exclusive(*role_id) {
            ButtonStyle::Secondary
        } else {
            ButtonStyle::Primary
        };
        let mut create_button = CreateButton::new(label, role_button_id(*role_id)).style(style);
        if let Some(emoji) = button.emoji.as_deref() {
            match valid_emoji(emoji) {
                Some(emoji) => create_button = create_button.emoji(emoji),
                None => warn!(role_id = role_id.0, emoji, "Ignoring invalid button emoji"),
            }
        }
        buttons.push(create_button);
    }

    let description = if config.exclusive_group().is_empty() {
        EMBED_DESCRIPTION.to_string()
    } else {
        format!("{EMBED_DESCRIPTION}\n{EXCLUSIVE_HINT}")
    };
    let embed = CreateEmbed::default()
        .title(EMBED_TITLE)
        .description(description)
        .colour(BLURPLE);

    let action_rows = buttons
        .chunks(MAX_BUTTONS_PER_ROW)
        .map(|row| CreateActionRow::buttons(row.to_vec()))
        .collect();

    RoleButtonsMessage {
        message: CreateMessage::default().embed(embed).action_rows(action_rows),
        missing_roles,
        skipped_roles,
    }
}
