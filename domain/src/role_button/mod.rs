pub mod button_id;
pub mod message;
pub mod reconcile;

use async_trait::async_trait;
use domain_shared::discord::{ChannelId, GuildId, MessageId, RoleId};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{instrument, warn};

/// Discord renders at most five action rows of five buttons each.
pub const MAX_BUTTONS: usize = 25;
pub const MAX_LABEL_LENGTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleButtonMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleButton {
    pub label: String,
    pub emoji: Option<String>,
}

/// Returns the trimmed label, or `None` when Discord would reject it.
pub fn valid_label(label: &str) -> Option<&str> {
    let label = label.trim();
    if label.is_empty() || label.chars().count() > MAX_LABEL_LENGTH {
        None
    } else {
        Some(label)
    }
}

/// Returns the trimmed emoji if it is a unicode emoji or a custom emoji
/// mention (`<:name:id>` or `<a:name:id>`).
pub fn valid_emoji(emoji: &str) -> Option<&str> {
    let emoji = emoji.trim();
    if emoji.is_empty() || emoji.chars().any(char::is_whitespace) {
        return None;
    }

    let Some(custom) = emoji.strip_prefix('<') else {
        return (!emoji.is_ascii()).then_some(emoji);
    };
    let mut parts = custom.strip_suffix('>')?.split(':');
    let animated = parts.next()?;
    let name = parts.next()?;
    let id = parts.next()?;

    let well_formed = (animated.is_empty() || animated == "a")
        && !name.is_empty()
        && !id.is_empty()
        && id.chars().all(|c| c.is_ascii_digit())
        && parts.next().is_none();
    well_formed.then_some(emoji)
}

/// Role buttons configured for a single guild.
///
/// The exclusive group is always a subset of the configured roles.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleButtonConfig {
    roles: BTreeMap<RoleId, RoleButton>,
    exclusive_group: BTreeSet<RoleId>,
    message: Option<RoleButtonMessage>,
}

impl RoleButtonConfig {
    /// Rebuilds a stored config. Entries that could never have been added
    /// through [`add_button`](Self::add_button) are kept, they are filtered
    /// out when the message is rendered.
    #[instrument(level = "trace", skip(snapshot))]
    pub fn from_snapshot(snapshot: RoleButtonConfigSnapshot) -> Self {
        let RoleButtonConfigSnapshot {
            roles,
            mut exclusive_group,
            message,
        } = snapshot;

        exclusive_group.retain(|role_id| {
            let known = roles.contains_key(role_id);
            if !known {
                warn!(
                    role_id = role_id.0,
                    "Dropping exclusive role without a configured button",
                );
            }
            known
        });

        Self {
            roles,
            exclusive_group,
            message,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn to_snapshot(&self) -> RoleButtonConfigSnapshot {
        RoleButtonConfigSnapshot {
            roles: self.roles.clone(),
            exclusive_group: self.exclusive_group.clone(),
            message: self.message,
        }
    }

    pub fn roles(&self) -> &BTreeMap<RoleId, RoleButton> {
        &self.roles
    }

    pub fn exclusive_group(&self) -> &BTreeSet<RoleId> {
        &self.exclusive_group
    }

    pub fn message(&self) -> Option<RoleButtonMessage> {
        self.message
    }

    pub fn label(&self, role_id: RoleId) -> Option<&str> {
        self.roles.get(&role_id).map(|button| button.label.as_str())
    }

    pub fn emoji(&self, role_id: RoleId) -> Option<&str> {
        self.roles
            .get(&role_id)
            .and_then(|button| button.emoji.as_deref())
    }

    pub fn has_button(&self, role_id: RoleId) -> bool {
        self.roles.contains_key(&role_id)
    }

    pub fn is_exclusive(&self, role_id: RoleId) -> bool {
        self.exclusive_group.contains(&role_id)
    }

    /// The roles a click on `role_id` has to evict: the whole exclusive group
    /// when the role belongs to it, nothing otherwise.
    pub fn exclusive_group_of(&self, role_id: RoleId) -> BTreeSet<RoleId> {
        if self.is_exclusive(role_id) {
            self.exclusive_group.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Adds a button for `role_id`. Neither the role nor the emoji may already
    /// be used by another button.
    #[instrument(level = "debug", skip(self, label))]
    pub fn add_button(
        &mut self,
        role_id: RoleId,
        label: &str,
        emoji: Option<&str>,
        exclusive: bool,
    ) -> Result<(), RoleButtonConfigError> {
        if self.roles.contains_key(&role_id) {
            return Err(RoleButtonConfigError::DuplicateButton);
        }
        if self.roles.len() >= MAX_BUTTONS {
            return Err(RoleButtonConfigError::TooManyButtons);
        }

        let label = valid_label(label).ok_or(RoleButtonConfigError::InvalidLabel)?;
        let emoji = emoji
            .map(|emoji| valid_emoji(emoji).ok_or(RoleButtonConfigError::InvalidEmoji))
            .transpose()?;
        if let Some(emoji) = emoji {
            if self
                .roles
                .values()
                .any(|button| button.emoji.as_deref() == Some(emoji))
            {
                return Err(RoleButtonConfigError::DuplicateButton);
            }
        }

        self.roles.insert(
            role_id,
            RoleButton {
                label: label.to_string(),
                emoji: emoji.map(str::to_string),
            },
        );
        if exclusive {
            self.exclusive_group.insert(role_id);
        }

        Ok(())
    }

    /// Removes the button and returns its label.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_button(&mut self, role_id: RoleId) -> Result<String, RoleButtonConfigError> {
        let button = self
            .roles
            .remove(&role_id)
            .ok_or(RoleButtonConfigError::ButtonNotFound)?;
        self.exclusive_group.remove(&role_id);

        Ok(button.label)
    }

    pub fn set_message(&mut self, message: RoleButtonMessage) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleButtonConfigSnapshot {
    pub roles: BTreeMap<RoleId, RoleButton>,
    pub exclusive_group: BTreeSet<RoleId>,
    pub message: Option<RoleButtonMessage>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoleButtonConfigError {
    #[error("A button for this role or emoji already exists")]
    DuplicateButton,
    #[error("No button exists for this role")]
    ButtonNotFound,
    #[error("The maximum number of buttons has been reached")]
    TooManyButtons,
    #[error("The button label is empty or too long")]
    InvalidLabel,
    #[error("The button emoji is not a valid emoji")]
    InvalidEmoji,
}

/// Per-guild role button configuration storage.
///
/// `get` never fails for an unknown guild, it returns an empty config instead.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RoleButtonConfigRepository {
    async fn get(
        &self,
        guild_id: GuildId,
    ) -> Result<RoleButtonConfig, RoleButtonConfigRepositoryError>;
    async fn put(
        &self,
        guild_id: GuildId,
        config: &RoleButtonConfig,
    ) -> Result<(), RoleButtonConfigRepositoryError>;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoleButtonConfigRepositoryError {
    #[error("Service unavailable")]
    ServiceUnavailable,
}
