use application_ports::role_button::{
    RoleButtonClickDto, RoleButtonError, RoleButtonPort, RoleButtonsRefreshDto,
};
use async_trait::async_trait;
use domain::ports::discord::{DiscordError, DiscordPort};
use domain::role_button::button_id::parse_role_button_id;
use domain::role_button::message::{create_role_buttons_message, RoleButtonsMessage};
use domain::role_button::reconcile::reconcile;
use domain::role_button::{
    RoleButtonConfig, RoleButtonConfigError, RoleButtonConfigRepository,
    RoleButtonConfigRepositoryError, RoleButtonMessage,
};
use domain_shared::discord::{ChannelId, GuildId, RoleId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const ROLE_BUTTON_CLICK_REASON: &str = "Role button clicked";

pub struct RoleButtonService {
    discord_port: Arc<dyn DiscordPort + Send + Sync>,
    role_button_config_repository: Arc<dyn RoleButtonConfigRepository + Send + Sync>,
}

impl RoleButtonService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        discord_port: Arc<dyn DiscordPort + Send + Sync>,
        role_button_config_repository: Arc<dyn RoleButtonConfigRepository + Send + Sync>,
    ) -> Self {
        Self {
            discord_port,
            role_button_config_repository,
        }
    }

    #[instrument(level = "debug", skip(self, config))]
    async fn render(
        &self,
        guild_id: GuildId,
        config: &RoleButtonConfig,
    ) -> Result<RoleButtonsMessage, RoleButtonError> {
        let existing_roles = self
            .discord_port
            .find_guild_role_ids(guild_id)
            .await
            .map_err(map_discord_err)?;

        Ok(create_role_buttons_message(config, &existing_roles))
    }

    /// Edits the guild's target message so it shows the buttons of `config`.
    #[instrument(level = "debug", skip(self, config))]
    async fn refresh_role_buttons(
        &self,
        guild_id: GuildId,
        mut config: RoleButtonConfig,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError> {
        let Some(target) = config.message() else {
            warn!(
                guild_id = guild_id.0,
                "Role buttons changed, but no role button message exists yet",
            );
            return Err(RoleButtonError::NoTargetMessage);
        };

        let RoleButtonsMessage {
            message,
            missing_roles,
            skipped_roles,
        } = self.render(guild_id, &config).await?;

        match self
            .discord_port
            .edit_message(target.channel_id, target.message_id, message)
            .await
        {
            Ok(()) => {
                info!(
                    guild_id = guild_id.0,
                    message_id = target.message_id.0,
                    "Role button message refreshed",
                );
                Ok(RoleButtonsRefreshDto {
                    missing_roles,
                    skipped_roles,
                })
            }
            Err(DiscordError::MessageNotFound) => {
                warn!(
                    guild_id = guild_id.0,
                    channel_id = target.channel_id.0,
                    message_id = target.message_id.0,
                    "Role button message was deleted, forgetting it",
                );
                config.clear_message();
                self.role_button_config_repository
                    .put(guild_id, &config)
                    .await
                    .map_err(map_repo_err)?;
                Err(RoleButtonError::NoTargetMessage)
            }
            Err(err) => Err(map_discord_err(err)),
        }
    }
}

#[async_trait]
impl RoleButtonPort for RoleButtonService {
    #[instrument(level = "info", skip(self))]
    async fn add_role_button(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        label: String,
        emoji: Option<String>,
        exclusive: bool,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError> {
        let mut config = self
            .role_button_config_repository
            .get(guild_id)
            .await
            .map_err(map_repo_err)?;

        config
            .add_button(role_id, &label, emoji.as_deref(), exclusive)
            .map_err(map_config_err)?;

        self.role_button_config_repository
            .put(guild_id, &config)
            .await
            .map_err(map_repo_err)?;

        info!(
            guild_id = guild_id.0,
            role_id = role_id.0,
            exclusive,
            "Role button added",
        );

        self.refresh_role_buttons(guild_id, config).await
    }

    #[instrument(level = "info", skip(self))]
    async fn remove_role_button(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError> {
        let mut config = self
            .role_button_config_repository
            .get(guild_id)
            .await
            .map_err(map_repo_err)?;

        let label = config.remove_button(role_id).map_err(map_config_err)?;

        self.role_button_config_repository
            .put(guild_id, &config)
            .await
            .map_err(map_repo_err)?;

        info!(
            guild_id = guild_id.0,
            role_id = role_id.0,
            label = %label,
            "Role button removed",
        );

        self.refresh_role_buttons(guild_id, config).await
    }

    #[instrument(level = "info", skip(self))]
    async fn send_role_buttons(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<RoleButtonsRefreshDto, RoleButtonError> {
        let mut config = self
            .role_button_config_repository
            .get(guild_id)
            .await
            .map_err(map_repo_err)?;

        let RoleButtonsMessage {
            message,
            missing_roles,
            skipped_roles,
        } = self.render(guild_id, &config).await?;

        let message_id = self
            .discord_port
            .send_message(channel_id, message)
            .await
            .map_err(map_discord_err)?;

        config.set_message(RoleButtonMessage {
            channel_id,
            message_id,
        });
        self.role_button_config_repository
            .put(guild_id, &config)
            .await
            .map_err(map_repo_err)?;

        info!(
            guild_id = guild_id.0,
            channel_id = channel_id.0,
            message_id = message_id.0,
            "Role button message sent",
        );

        Ok(RoleButtonsRefreshDto {
            missing_roles,
            skipped_roles,
        })
    }

    #[instrument(level = "info", skip(self))]
    async fn click_role_button(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        custom_id: &str,
    ) -> Result<RoleButtonClickDto, RoleButtonError> {
        let role_id = parse_role_button_id(custom_id).ok_or(RoleButtonError::UnknownButton)?;

        let config = self
            .role_button_config_repository
            .get(guild_id)
            .await
            .map_err(map_repo_err)?;

        if !config.has_button(role_id) {
            warn!(
                guild_id = guild_id.0,
                user_id = user_id.0,
                role_id = role_id.0,
                "User clicked a button of a role that is no longer configured",
            );
            return Err(RoleButtonError::UnknownButton);
        }

        let current_roles = self
            .discord_port
            .find_user_roles(guild_id, user_id)
            .await
            .map_err(map_discord_err)?
            .ok_or(RoleButtonError::MemberNotFound)?;

        let diff = reconcile(&current_roles, role_id, &config.exclusive_group_of(role_id));

        self.discord_port
            .apply_role_diff(guild_id, user_id, &diff, ROLE_BUTTON_CLICK_REASON)
            .await
            .map_err(map_discord_err)?;

        info!(
            guild_id = guild_id.0,
            user_id = user_id.0,
            assigned = ?diff.to_assign,
            removed = ?diff.to_remove,
            "Role button click applied",
        );

        let labels = |roles: &BTreeSet<RoleId>| {
            roles
                .iter()
                .map(|role_id| {
                    config
                        .label(*role_id)
                        .map(str::to_string)
                        .unwrap_or_else(|| role_id.to_string())
                })
                .collect::<Vec<_>>()
        };

        Ok(RoleButtonClickDto {
            added: labels(&diff.to_assign),
            removed: labels(&diff.to_remove),
        })
    }
}

#[instrument(level = "trace", skip_all)]
fn map_config_err(err: RoleButtonConfigError) -> RoleButtonError {
    match err {
        RoleButtonConfigError::DuplicateButton => RoleButtonError::DuplicateButton,
        RoleButtonConfigError::ButtonNotFound => RoleButtonError::ButtonNotFound,
        RoleButtonConfigError::TooManyButtons => RoleButtonError::TooManyButtons,
        RoleButtonConfigError::InvalidLabel => RoleButtonError::InvalidLabel,
        RoleButtonConfigError::InvalidEmoji => RoleButtonError::InvalidEmoji,
    }
}

#[instrument(level = "trace", skip_all)]
fn map_discord_err(err: DiscordError) -> RoleButtonError {
    match err {
        DiscordError::DiscordUnavailable => {
            error!("DiscordError::DiscordUnavailable");
            RoleButtonError::TemporaryUnavailable
        }
        DiscordError::RoleNotFound => RoleButtonError::RoleNotFound,
        DiscordError::MemberNotFound => RoleButtonError::MemberNotFound,
        DiscordError::MissingPermissions => {
            error!("DiscordError::MissingPermissions");
            RoleButtonError::MissingPermissions
        }
        DiscordError::MessageNotFound => RoleButtonError::NoTargetMessage,
    }
}

#[instrument(level = "trace", skip_all)]
fn map_repo_err(err: RoleButtonConfigRepositoryError) -> RoleButtonError {
    match err {
        RoleButtonConfigRepositoryError::ServiceUnavailable => {
            error!("RoleButtonConfigRepositoryError::ServiceUnavailable");
            RoleButtonError::TemporaryUnavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ports::discord::{CreateActionRow, CreateMessage, MockDiscordPort, RoleDiff};
    use domain::role_button::{RoleButton, RoleButtonConfigSnapshot, MAX_BUTTONS};
    use domain::role_button::button_id::role_button_id;
    use domain::role_button::MockRoleButtonConfigRepository;
    use domain_shared::discord::MessageId;
    use mockall::predicate::eq;

    const GUILD: GuildId = GuildId(1);
    const CHANNEL: ChannelId = ChannelId(2);
    const MESSAGE: MessageId = MessageId(3);
    const USER: UserId = UserId(4);
    const MEMBER: RoleId = RoleId(10);
    const RED: RoleId = RoleId(20);
    const BLUE: RoleId = RoleId(30);

    fn config(with_message: bool) -> RoleButtonConfig {
        let mut config = RoleButtonConfig::default();
        config.add_button(MEMBER, "Member", None, false).unwrap();
        config.add_button(RED, "Red team", None, true).unwrap();
        config.add_button(BLUE, "Blue team", None, true).unwrap();
        if with_message {
            config.set_message(RoleButtonMessage {
                channel_id: CHANNEL,
                message_id: MESSAGE,
            });
        }
        config
    }

    fn guild_roles(role_ids: &[RoleId]) -> BTreeSet<RoleId> {
        role_ids.iter().copied().collect()
    }

    fn rendered_buttons(message: &CreateMessage) -> Vec<(String, Option<String>)> {
        message
            .action_rows
            .iter()
            .flat_map(|CreateActionRow::Buttons { components }| components)
            .map(|button| (button.label.clone(), button.emoji.clone()))
            .collect()
    }

    fn service(
        discord: MockDiscordPort,
        repository: MockRoleButtonConfigRepository,
    ) -> RoleButtonService {
        RoleButtonService::new(Arc::new(discord), Arc::new(repository))
    }

    #[tokio::test]
    async fn click_on_exclusive_role_swaps_group_member() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository
            .expect_get()
            .with(eq(GUILD))
            .returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_user_roles()
            .with(eq(GUILD), eq(USER))
            .returning(|_, _| Ok(Some(BTreeSet::from([MEMBER, RED]))));
        discord
            .expect_apply_role_diff()
            .withf(|guild_id, user_id, diff: &RoleDiff, _reason| {
                *guild_id == GUILD
                    && *user_id == USER
                    && diff.to_assign == BTreeSet::from([BLUE])
                    && diff.to_remove == BTreeSet::from([RED])
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let outcome = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(BLUE).0)
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["Blue team".to_string()]);
        assert_eq!(outcome.removed, vec!["Red team".to_string()]);
    }

    #[tokio::test]
    async fn click_on_held_role_removes_it() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_user_roles()
            .returning(|_, _| Ok(Some(BTreeSet::from([MEMBER]))));
        discord
            .expect_apply_role_diff()
            .withf(|_, _, diff: &RoleDiff, _| {
                diff.to_assign.is_empty() && diff.to_remove == BTreeSet::from([MEMBER])
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let outcome = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(MEMBER).0)
            .await
            .unwrap();

        assert!(outcome.added.is_empty());
        assert_eq!(outcome.removed, vec!["Member".to_string()]);
    }

    #[tokio::test]
    async fn click_on_unconfigured_role_is_rejected() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord.expect_find_user_roles().never();
        discord.expect_apply_role_diff().never();

        let result = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(RoleId(99)).0)
            .await;

        assert_eq!(result, Err(RoleButtonError::UnknownButton));
    }

    #[tokio::test]
    async fn click_with_foreign_custom_id_is_rejected() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().never();

        let result = service(MockDiscordPort::new(), repository)
            .click_role_button(GUILD, USER, "verify_me_button")
            .await;

        assert_eq!(result, Err(RoleButtonError::UnknownButton));
    }

    #[tokio::test]
    async fn click_on_deleted_role_surfaces_role_not_found() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_user_roles()
            .returning(|_, _| Ok(Some(BTreeSet::new())));
        discord
            .expect_apply_role_diff()
            .returning(|_, _, _, _| Err(DiscordError::RoleNotFound));

        let result = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(MEMBER).0)
            .await;

        assert_eq!(result, Err(RoleButtonError::RoleNotFound));
    }

    #[tokio::test]
    async fn click_by_member_who_left_meanwhile_is_member_not_found() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_user_roles()
            .returning(|_, _| Ok(Some(BTreeSet::new())));
        discord
            .expect_apply_role_diff()
            .returning(|_, _, _, _| Err(DiscordError::MemberNotFound));

        let result = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(MEMBER).0)
            .await;

        assert_eq!(result, Err(RoleButtonError::MemberNotFound));
    }

    #[tokio::test]
    async fn click_by_non_member_is_rejected() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));

        let mut discord = MockDiscordPort::new();
        discord.expect_find_user_roles().returning(|_, _| Ok(None));
        discord.expect_apply_role_diff().never();

        let result = service(discord, repository)
            .click_role_button(GUILD, USER, &role_button_id(MEMBER).0)
            .await;

        assert_eq!(result, Err(RoleButtonError::MemberNotFound));
    }

    #[tokio::test]
    async fn add_role_button_saves_and_refreshes_message() {
        let new_role = RoleId(40);

        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));
        repository
            .expect_put()
            .withf(move |guild_id, config: &RoleButtonConfig| {
                *guild_id == GUILD
                    && config.label(new_role) == Some("Green team")
                    && config.emoji(new_role) == Some("🟢")
                    && config.is_exclusive(new_role)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_guild_role_ids()
            .returning(move |_| Ok(guild_roles(&[MEMBER, RED, BLUE, new_role])));
        discord
            .expect_edit_message()
            .withf(|channel_id, message_id, message: &CreateMessage| {
                *channel_id == CHANNEL
                    && *message_id == MESSAGE
                    && rendered_buttons(message).contains(&(
                        "Green team".to_string(),
                        Some("🟢".to_string()),
                    ))
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let refresh = service(discord, repository)
            .add_role_button(
                GUILD,
                new_role,
                "Green team".to_string(),
                Some("🟢".to_string()),
                true,
            )
            .await
            .unwrap();

        assert!(refresh.missing_roles.is_empty());
    }

    #[tokio::test]
    async fn add_role_button_with_invalid_emoji_is_rejected_without_saving() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));
        repository.expect_put().never();

        let result = service(MockDiscordPort::new(), repository)
            .add_role_button(
                GUILD,
                RoleId(40),
                "Green team".to_string(),
                Some("green".to_string()),
                false,
            )
            .await;

        assert_eq!(result, Err(RoleButtonError::InvalidEmoji));
    }

    #[tokio::test]
    async fn add_duplicate_role_button_is_rejected_without_saving() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));
        repository.expect_put().never();

        let mut discord = MockDiscordPort::new();
        discord.expect_edit_message().never();

        let result = service(discord, repository)
            .add_role_button(GUILD, RED, "Again".to_string(), None, false)
            .await;

        assert_eq!(result, Err(RoleButtonError::DuplicateButton));
    }

    #[tokio::test]
    async fn add_role_button_without_message_saves_and_reports_no_target() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository
            .expect_get()
            .returning(|_| Ok(RoleButtonConfig::default()));
        repository.expect_put().times(1).returning(|_, _| Ok(()));

        let mut discord = MockDiscordPort::new();
        discord.expect_edit_message().never();

        let result = service(discord, repository)
            .add_role_button(GUILD, MEMBER, "Member".to_string(), None, false)
            .await;

        assert_eq!(result, Err(RoleButtonError::NoTargetMessage));
    }

    #[tokio::test]
    async fn refresh_forgets_deleted_target_message() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));
        repository
            .expect_put()
            .withf(|_, config: &RoleButtonConfig| config.message().is_some())
            .times(1)
            .returning(|_, _| Ok(()));
        repository
            .expect_put()
            .withf(|_, config: &RoleButtonConfig| config.message().is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_guild_role_ids()
            .returning(|_| Ok(guild_roles(&[MEMBER, RED, BLUE])));
        discord
            .expect_edit_message()
            .returning(|_, _, _| Err(DiscordError::MessageNotFound));

        let result = service(discord, repository)
            .remove_role_button(GUILD, BLUE)
            .await;

        assert_eq!(result, Err(RoleButtonError::NoTargetMessage));
    }

    #[tokio::test]
    async fn remove_unknown_role_button_is_rejected() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(true)));
        repository.expect_put().never();

        let result = service(MockDiscordPort::new(), repository)
            .remove_role_button(GUILD, RoleId(99))
            .await;

        assert_eq!(result, Err(RoleButtonError::ButtonNotFound));
    }

    #[tokio::test]
    async fn send_role_buttons_stores_new_target_and_reports_missing_roles() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(|_| Ok(config(false)));
        repository
            .expect_put()
            .withf(|_, config: &RoleButtonConfig| {
                config.message()
                    == Some(RoleButtonMessage {
                        channel_id: CHANNEL,
                        message_id: MESSAGE,
                    })
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_guild_role_ids()
            .returning(|_| Ok(guild_roles(&[MEMBER, RED])));
        discord
            .expect_send_message()
            .with(eq(CHANNEL), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(MESSAGE));

        let refresh = service(discord, repository)
            .send_role_buttons(GUILD, CHANNEL)
            .await
            .unwrap();

        assert_eq!(refresh.missing_roles, vec![BLUE]);
    }

    #[tokio::test]
    async fn send_role_buttons_leaves_out_stored_buttons_over_the_limits() {
        let stored = || {
            RoleButtonConfig::from_snapshot(RoleButtonConfigSnapshot {
                roles: (0..=MAX_BUTTONS as u64)
                    .map(|id| {
                        let label = if id == 0 { String::new() } else { format!("Role {id}") };
                        (RoleId(id), RoleButton { label, emoji: None })
                    })
                    .chain(std::iter::once((
                        RoleId(1000),
                        RoleButton {
                            label: "Overflow".to_string(),
                            emoji: None,
                        },
                    )))
                    .collect(),
                ..Default::default()
            })
        };
        let all_roles = stored().roles().keys().copied().collect::<BTreeSet<_>>();

        let mut repository = MockRoleButtonConfigRepository::new();
        repository.expect_get().returning(move |_| Ok(stored()));
        repository.expect_put().times(1).returning(|_, _| Ok(()));

        let mut discord = MockDiscordPort::new();
        discord
            .expect_find_guild_role_ids()
            .returning(move |_| Ok(all_roles.clone()));
        discord
            .expect_send_message()
            .withf(|_, message: &CreateMessage| {
                message.action_rows.len() <= 5
                    && rendered_buttons(message).len() == MAX_BUTTONS
                    && rendered_buttons(message)
                        .iter()
                        .all(|(label, _)| !label.is_empty())
            })
            .times(1)
            .returning(|_, _| Ok(MESSAGE));

        let refresh = service(discord, repository)
            .send_role_buttons(GUILD, CHANNEL)
            .await
            .unwrap();

        assert_eq!(refresh.skipped_roles, vec![RoleId(0), RoleId(1000)]);
        assert!(refresh.missing_roles.is_empty());
    }

    #[tokio::test]
    async fn storage_outage_is_temporary_unavailable() {
        let mut repository = MockRoleButtonConfigRepository::new();
        repository
            .expect_get()
            .returning(|_| Err(RoleButtonConfigRepositoryError::ServiceUnavailable));

        let result = service(MockDiscordPort::new(), repository)
            .send_role_buttons(GUILD, CHANNEL)
            .await;

        assert_eq!(result, Err(RoleButtonError::TemporaryUnavailable));
    }
}
