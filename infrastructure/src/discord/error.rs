use domain::ports::discord::DiscordError;
use serenity::http::HttpError;
use tracing::{instrument, warn};

/// Discord's JSON error code for a member that left the guild.
const UNKNOWN_MEMBER: isize = 10007;

#[instrument(level = "trace", skip(err))]
pub fn status_code(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(err) => err.status_code().map(|status| status.as_u16()),
        _ => None,
    }
}

#[instrument(level = "trace", skip(err))]
fn json_error_code(err: &serenity::Error) -> Option<isize> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.error.code)
        }
        _ => None,
    }
}

/// Maps a failed Discord call. `not_found` is what a 404 means for the call.
#[instrument(level = "trace", skip(err))]
pub fn serenity_to_domain_error(err: serenity::Error, not_found: DiscordError) -> DiscordError {
    match classify(status_code(&err), json_error_code(&err), not_found) {
        DiscordError::DiscordUnavailable => {
            warn!(error = ?err, "Discord request failed");
            DiscordError::DiscordUnavailable
        }
        err => err,
    }
}

fn classify(status: Option<u16>, json_code: Option<isize>, not_found: DiscordError) -> DiscordError {
    match (status, json_code) {
        (Some(404), Some(UNKNOWN_MEMBER)) => DiscordError::MemberNotFound,
        (Some(404), _) => not_found,
        (Some(403), _) => DiscordError::MissingPermissions,
        _ => DiscordError::DiscordUnavailable,
    }
}
