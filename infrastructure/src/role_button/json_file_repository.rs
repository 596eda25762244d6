use crate::role_button::persisted::{PersistedGuildConfig, PersistedRoleButtons};
use async_trait::async_trait;
use domain::role_button::{
    RoleButtonConfig, RoleButtonConfigRepository, RoleButtonConfigRepositoryError,
};
use domain_shared::discord::GuildId;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Role button configs of every guild, mirrored from a single JSON file.
///
/// The file is read once on [`load`](Self::load) and rewritten in full on
/// every `put`. Writes go to a temporary sibling that is renamed over the
/// original.
pub struct JsonFileRoleButtonConfigRepository {
    path: PathBuf,
    configs: RwLock<BTreeMap<GuildId, RoleButtonConfig>>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read role button file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse role button file: {0}")]
    Json(#[from] serde_json::Error),
}

impl JsonFileRoleButtonConfigRepository {
    /// Loads the file at `path`. A missing file means no guild is configured.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();
        info!(path = %path.display(), "Loading role button configs");

        let persisted: PersistedRoleButtons = match tokio::fs::read(&path).await {
            Ok(content) => serde_json::from_slice(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("Role button file does not exist yet, starting empty");
                PersistedRoleButtons::new()
            }
            Err(err) => return Err(err.into()),
        };

        let configs = persisted
            .into_iter()
            .map(|(guild_id, config)| (guild_id, RoleButtonConfig::from(config)))
            .collect::<BTreeMap<_, _>>();

        info!(guilds = configs.len(), "Role button configs loaded");

        Ok(Self {
            path,
            configs: RwLock::new(configs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn all(&self) -> BTreeMap<GuildId, RoleButtonConfig> {
        self.configs.read().await.clone()
    }

    #[instrument(level = "debug", skip(self, configs))]
    async fn write(
        &self,
        configs: &BTreeMap<GuildId, RoleButtonConfig>,
    ) -> Result<(), RoleButtonConfigRepositoryError> {
        let persisted = configs
            .iter()
            .map(|(guild_id, config)| (*guild_id, PersistedGuildConfig::from(config)))
            .collect::<PersistedRoleButtons>();

        let content = serde_json::to_vec_pretty(&persisted).map_err(|err| {
            warn!(error = ?err, "Failed to serialize role button configs");
            RoleButtonConfigRepositoryError::ServiceUnavailable
        })?;

        let temporary_path = temporary_path(&self.path);
        tokio::fs::write(&temporary_path, &content)
            .await
            .map_err(|err| {
                warn!(error = ?err, path = %temporary_path.display(), "Failed to write role button file");
                RoleButtonConfigRepositoryError::ServiceUnavailable
            })?;
        tokio::fs::rename(&temporary_path, &self.path)
            .await
            .map_err(|err| {
                warn!(error = ?err, path = %self.path.display(), "Failed to replace role button file");
                RoleButtonConfigRepositoryError::ServiceUnavailable
            })?;

        Ok(())
    }
}

#[async_trait]
impl RoleButtonConfigRepository for JsonFileRoleButtonConfigRepository {
    #[instrument(level = "debug", skip(self))]
    async fn get(
        &self,
        guild_id: GuildId,
    ) -> Result<RoleButtonConfig, RoleButtonConfigRepositoryError> {
        Ok(self
            .configs
            .read()
            .await
            .get(&guild_id)
            .cloned()
            .unwrap_or_default())
    }

    #[instrument(level = "debug", err, skip(self, config))]
    async fn put(
        &self,
        guild_id: GuildId,
        config: &RoleButtonConfig,
    ) -> Result<(), RoleButtonConfigRepositoryError> {
        let mut configs = self.configs.write().await;

        let mut updated = configs.clone();
        updated.insert(guild_id, config.clone());

        self.write(&updated).await?;
        *configs = updated;

        Ok(())
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut temporary_path = path.as_os_str().to_owned();
    temporary_path.push(".tmp");
    PathBuf::from(temporary_path)
}
