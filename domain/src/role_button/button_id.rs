use crate::ports::discord::ButtonId;
use domain_shared::discord::RoleId;
use tracing::instrument;

pub const ROLE_BUTTON_ID_PREFIX: &str = "role-button:";

#[instrument(level = "trace")]
pub fn role_button_id(role_id: RoleId) -> ButtonId {
    ButtonId(format!("{ROLE_BUTTON_ID_PREFIX}{}", role_id.0))
}

/// Extracts the role id from a role button's custom id.
///
/// Returns `None` for custom ids that do not belong to role buttons.
#[instrument(level = "trace")]
pub fn parse_role_button_id(custom_id: &str) -> Option<RoleId> {
    custom_id
        .strip_prefix(ROLE_BUTTON_ID_PREFIX)?
        .parse::<u64>()
        .ok()
        .map(RoleId)
}
