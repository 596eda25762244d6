mod channel_id;
mod create_button;
mod create_embed;
mod create_message;
mod error;
mod guild_id;
mod message_id;
mod role_id;
mod user_id;

use crate::discord::channel_id::domain_to_serenity_channel_id;
use crate::discord::create_message::{
    domain_to_serenity_create_message, domain_to_serenity_edit_message,
};
use crate::discord::error::{serenity_to_domain_error, status_code};
use crate::discord::guild_id::domain_to_serenity_guild_id;
use crate::discord::message_id::{domain_to_serenity_message_id, serenity_to_domain_message_id};
use crate::discord::role_id::{domain_to_serenity_role_id, serenity_to_domain_role_id};
use crate::discord::user_id::domain_to_serenity_user_id;
use async_trait::async_trait;
use domain::ports::discord::{
    ChannelId, CreateMessage, DiscordError, DiscordPort, GuildId, MessageId, RoleChange,
    RoleDiff,
};
use domain_shared::discord::{RoleId, UserId};
use poise::serenity_prelude::Http;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct DiscordAdapter {
    client: Arc<Http>,
}

impl DiscordAdapter {
    #[instrument(level = "trace", skip_all)]
    pub fn new(client: Arc<Http>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiscordPort for DiscordAdapter {
    #[instrument(level = "debug", err, skip(self, message))]
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: CreateMessage,
    ) -> Result<MessageId, DiscordError> {
        let message = domain_to_serenity_create_message(message);
        let channel_id = domain_to_serenity_channel_id(channel_id);

        let message = channel_id
            .send_message(self.client.as_ref(), message)
            .await
            .map_err(|err| serenity_to_domain_error(err, DiscordError::DiscordUnavailable))?;

        Ok(serenity_to_domain_message_id(message.id))
    }

    #[instrument(level = "debug", err, skip(self, message))]
    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: CreateMessage,
    ) -> Result<(), DiscordError> {
        let message = domain_to_serenity_edit_message(message);
        let channel_id = domain_to_serenity_channel_id(channel_id);
        let message_id = domain_to_serenity_message_id(message_id);

        channel_id
            .edit_message(self.client.as_ref(), message_id, message)
            .await
            .map_err(|err| serenity_to_domain_error(err, DiscordError::MessageNotFound))?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn find_guild_role_ids(
        &self,
        guild_id: GuildId,
    ) -> Result<BTreeSet<RoleId>, DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);

        let role_ids = self
            .client
            .get_guild_roles(guild_id)
            .await
            .map_err(|err| serenity_to_domain_error(err, DiscordError::DiscordUnavailable))?
            .into_iter()
            .map(|role| serenity_to_domain_role_id(role.id))
            .collect();

        Ok(role_ids)
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn find_user_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<BTreeSet<RoleId>>, DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = domain_to_serenity_user_id(user_id);

        let member = match self.client.get_member(guild_id, user_id).await {
            Ok(member) => member,
            Err(err) if status_code(&err) == Some(404) => return Ok(None),
            Err(err) => {
                return Err(serenity_to_domain_error(
                    err,
                    DiscordError::DiscordUnavailable,
                ))
            }
        };

        Ok(Some(
            member
                .roles
                .into_iter()
                .map(serenity_to_domain_role_id)
                .collect(),
        ))
    }

    #[instrument(level = "debug", err, skip(self, role_diff, reason))]
    async fn apply_role_diff(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_diff: &RoleDiff,
        reason: &str,
    ) -> Result<(), DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = domain_to_serenity_user_id(user_id);

        for change in role_diff.changes() {
            let result = match change {
                RoleChange::Assign(role_id) => {
                    self.client
                        .add_member_role(
                            guild_id,
                            user_id,
                            domain_to_serenity_role_id(role_id),
                            Some(reason),
                        )
                        .await
                }
                RoleChange::Remove(role_id) => {
                    self.client
                        .remove_member_role(
                            guild_id,
                            user_id,
                            domain_to_serenity_role_id(role_id),
                            Some(reason),
                        )
                        .await
                }
            };
            result.map_err(|err| serenity_to_domain_error(err, DiscordError::RoleNotFound))?;
        }

        info!(
            guild_id = guild_id.get(),
            user_id = user_id.get(),
            assigned = role_diff.to_assign.len(),
            removed = role_diff.to_remove.len(),
            "Role diff applied",
        );

        Ok(())
    }
}
