use crate::discord::response::unavailable::temporary_unavailable;
use application_ports::role_button::{RoleButtonClickDto, RoleButtonError, RoleButtonsRefreshDto};
use domain::role_button::{MAX_BUTTONS, MAX_LABEL_LENGTH};
use domain_shared::discord::RoleId;
use poise::CreateReply;
use tracing::instrument;

#[instrument(level = "debug", skip_all)]
pub fn click_applied(click: &RoleButtonClickDto) -> CreateReply {
    let mut parts = Vec::with_capacity(2);

    if !click.added.is_empty() {
        parts.push(format!("✅ Role added: {}.", quote_all(&click.added)));
    }
    if !click.removed.is_empty() {
        parts.push(format!("❌ Role removed: {}.", quote_all(&click.removed)));
    }

    ephemeral(parts.join(" "))
}

#[instrument(level = "debug", skip_all)]
pub fn buttons_updated(summary: impl Into<String>, refresh: &RoleButtonsRefreshDto) -> CreateReply {
    let mut content = summary.into();

    if !refresh.missing_roles.is_empty() {
        let missing_roles = role_ids(&refresh.missing_roles);
        content.push_str(&format!(
            "\n⚠️ These configured roles no longer exist and were left out: {missing_roles}. \
            Use `/removerolebutton` to clean them up."
        ));
    }
    if !refresh.skipped_roles.is_empty() {
        content.push_str(&format!(
            "\n⚠️ These buttons could not be shown, their label is invalid or the message \
            already holds {MAX_BUTTONS} buttons: {}. Use `/removerolebutton` to clean them up.",
            role_ids(&refresh.skipped_roles)
        ));
    }

    ephemeral(content)
}

#[instrument(level = "debug", skip_all)]
pub fn role_button_error(error: RoleButtonError) -> CreateReply {
    let content = match error {
        RoleButtonError::DuplicateButton => {
            "❌ A button for this role or with this emoji already exists.".to_string()
        }
        RoleButtonError::ButtonNotFound => "❌ No button is configured for this role.".to_string(),
        RoleButtonError::TooManyButtons => {
            format!("❌ A role button message can hold at most {MAX_BUTTONS} buttons.")
        }
        RoleButtonError::InvalidLabel => {
            format!("❌ The label must be between 1 and {MAX_LABEL_LENGTH} characters long.")
        }
        RoleButtonError::InvalidEmoji => {
            "❌ The emoji must be a single unicode emoji or a custom emoji of this server."
                .to_string()
        }
        RoleButtonError::NoTargetMessage => {
            "⚠️ The role button message was not found. Use `/initroles` first.".to_string()
        }
        RoleButtonError::UnknownButton => {
            "❌ This button is no longer configured.".to_string()
        }
        RoleButtonError::MemberNotFound => "❌ You are not a member of this server.".to_string(),
        RoleButtonError::RoleNotFound => {
            "⚠️ This role no longer exists. Please ask an administrator to remove the button."
                .to_string()
        }
        RoleButtonError::MissingPermissions => {
            "❌ I am not allowed to manage this role. My role has to be above it.".to_string()
        }
        RoleButtonError::TemporaryUnavailable => return temporary_unavailable(),
    };

    ephemeral(content)
}

#[instrument(level = "debug")]
pub fn outside_guild() -> CreateReply {
    ephemeral("❌ Role buttons only work inside a server.".to_string())
}

fn role_ids(role_ids: &[RoleId]) -> String {
    role_ids
        .iter()
        .map(|role_id| role_id.0.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote_all(labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| format!("`{label}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn ephemeral(content: String) -> CreateReply {
    CreateReply::default()
        .content(content)
        .ephemeral(true)
        .reply(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_reply_lists_added_and_removed_roles() {
        let reply = click_applied(&RoleButtonClickDto {
            added: vec!["Blue team".to_string()],
            removed: vec!["Red team".to_string()],
        });

        assert_eq!(
            reply.content.as_deref(),
            Some("✅ Role added: `Blue team`. ❌ Role removed: `Red team`.")
        );
        assert_eq!(reply.ephemeral, Some(true));
    }

    #[test]
    fn refresh_reply_warns_about_missing_roles() {
        let reply = buttons_updated(
            "✅ Button added.",
            &RoleButtonsRefreshDto {
                missing_roles: vec![RoleId(42)],
                skipped_roles: Vec::new(),
            },
        );

        let content = reply.content.unwrap();
        assert!(content.starts_with("✅ Button added."));
        assert!(content.contains("42"));
        assert!(!content.contains("could not be shown"));
    }

    #[test]
    fn refresh_reply_warns_about_skipped_buttons() {
        let reply = buttons_updated(
            "✅ Role button message created.",
            &RoleButtonsRefreshDto {
                missing_roles: Vec::new(),
                skipped_roles: vec![RoleId(7), RoleId(1000)],
            },
        );

        let content = reply.content.unwrap();
        assert!(content.contains("could not be shown"));
        assert!(content.contains("7, 1000"));
    }

    #[test]
    fn click_outside_guild_gets_an_ephemeral_reply() {
        let reply = outside_guild();

        assert_eq!(reply.ephemeral, Some(true));
        assert!(reply.content.unwrap().contains("inside a server"));
    }

    #[test]
    fn no_target_message_points_to_setup_command() {
        let reply = role_button_error(RoleButtonError::NoTargetMessage);

        assert!(reply.content.unwrap().contains("/initroles"));
    }
}
