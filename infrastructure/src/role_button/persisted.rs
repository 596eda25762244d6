use domain::role_button::{
    RoleButton, RoleButtonConfig, RoleButtonConfigSnapshot, RoleButtonMessage,
};
use domain_shared::discord::{ChannelId, GuildId, MessageId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// On-disk layout: `{guild_id: {roles: {role_id: button}, unique: [role_id], message?}}`.
pub type PersistedRoleButtons = BTreeMap<GuildId, PersistedGuildConfig>;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedGuildConfig {
    #[serde(default)]
    pub roles: BTreeMap<RoleId, PersistedButton>,
    #[serde(default)]
    pub unique: BTreeSet<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<PersistedMessage>,
}

/// A button is stored as its bare label unless it carries an emoji.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedButton {
    Label(String),
    Button {
        label: String,
        #[serde(default)]
        emoji: Option<String>,
    },
}

impl From<PersistedButton> for RoleButton {
    fn from(persisted: PersistedButton) -> Self {
        match persisted {
            PersistedButton::Label(label) => RoleButton { label, emoji: None },
            PersistedButton::Button { label, emoji } => RoleButton { label, emoji },
        }
    }
}

impl From<RoleButton> for PersistedButton {
    fn from(button: RoleButton) -> Self {
        match button {
            RoleButton { label, emoji: None } => PersistedButton::Label(label),
            RoleButton {
                label,
                emoji: Some(emoji),
            } => PersistedButton::Button {
                label,
                emoji: Some(emoji),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PersistedMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

impl From<PersistedGuildConfig> for RoleButtonConfig {
    fn from(persisted: PersistedGuildConfig) -> Self {
        let PersistedGuildConfig {
            roles,
            unique,
            message,
        } = persisted;

        RoleButtonConfig::from_snapshot(RoleButtonConfigSnapshot {
            roles: roles
                .into_iter()
                .map(|(role_id, button)| (role_id, button.into()))
                .collect(),
            exclusive_group: unique,
            message: message.map(|message| RoleButtonMessage {
                channel_id: message.channel_id,
                message_id: message.message_id,
            }),
        })
    }
}

impl From<&RoleButtonConfig> for PersistedGuildConfig {
    fn from(config: &RoleButtonConfig) -> Self {
        let RoleButtonConfigSnapshot {
            roles,
            exclusive_group,
            message,
        } = config.to_snapshot();

        PersistedGuildConfig {
            roles: roles
                .into_iter()
                .map(|(role_id, button)| (role_id, button.into()))
                .collect(),
            unique: exclusive_group,
            message: message.map(|message| PersistedMessage {
                channel_id: message.channel_id,
                message_id: message.message_id,
            }),
        }
    }
}
