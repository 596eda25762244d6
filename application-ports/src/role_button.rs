use async_trait::async_trait;
use domain_shared::discord::{ChannelId, GuildId, RoleId, UserId};
use thiserror::Error;

#[async_trait]
pub trait RoleButtonPort {
    /// Adds a button and refreshes the guild's role button message.
    ///
    /// On `NoTargetMessage` the button has already been saved.
    async fn add_role_button(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        label: String,
        emoji: Option<String>,
        exclusive: bool,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError>;

    /// Removes a button and refreshes the guild's role button message.
    ///
    /// On `NoTargetMessage` the button has already been removed.
    async fn remove_role_button(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError>;

    /// Sends a new role button message and makes it the guild's target message.
    async fn send_role_buttons(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError>;

    async fn click_role_button(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        custom_id: &str,
    ) -> Result<RoleButtonClickDto, RoleButtonError>;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoleButtonError {
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
    #[error("No role button message has been sent yet")]
    NoTargetMessage,
    #[error("The clicked button is not configured")]
    UnknownButton,
    #[error("The member was not found")]
    MemberNotFound,
    #[error("The role was not found")]
    RoleNotFound,
    #[error("The bot lacks permissions")]
    MissingPermissions,
    #[error("Service is temporarily unavailable")]
    TemporaryUnavailable,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleButtonsRefreshDto {
    /// Configured roles skipped because they no longer exist in the guild.
    pub missing_roles: Vec<RoleId>,
    /// Configured roles left out because their button breaks Discord's limits.
    pub skipped_roles: Vec<RoleId>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleButtonClickDto {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}
