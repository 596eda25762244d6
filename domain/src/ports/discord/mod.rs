mod create_action_row;
mod create_button;
mod create_embed;
mod create_message;
mod role_diff;

pub use create_action_row::{CreateActionRow, MAX_BUTTONS_PER_ROW};
pub use create_button::{ButtonId, ButtonStyle, CreateButton};
pub use create_embed::CreateEmbed;
pub use create_message::CreateMessage;
pub use domain_shared::discord::{ChannelId, GuildId, MessageId, RoleId, UserId};
pub use role_diff::{RoleChange, RoleDiff};

use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait DiscordPort {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: CreateMessage,
    ) -> Result<MessageId, DiscordError>;

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: CreateMessage,
    ) -> Result<(), DiscordError>;

    async fn find_guild_role_ids(
        &self,
        guild_id: GuildId,
    ) -> Result<BTreeSet<RoleId>, DiscordError>;

    /// Returns `None` when the user is not a member of the guild.
    async fn find_user_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<BTreeSet<RoleId>>, DiscordError>;

    /// Applies [`RoleDiff::changes`] in order and stops at the first failure.
    async fn apply_role_diff(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_diff: &RoleDiff,
        reason: &str,
    ) -> Result<(), DiscordError>;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiscordError {
    #[error("Discord is unavailable")]
    DiscordUnavailable,
    #[error("Role not found")]
    RoleNotFound,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Message not found")]
    MessageNotFound,
    #[error("Missing permissions")]
    MissingPermissions,
}
