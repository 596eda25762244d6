use crate::application_ports::Locator;
use crate::discord::Error;
use poise::Command;
use tracing::instrument;

pub mod add_role_button;
pub mod remove_role_button;
pub mod send_role_buttons;

#[instrument(level = "trace", skip())]
pub fn enabled_commands<L: Locator + Send + Sync + 'static>() -> Vec<Command<L, Error>> {
    vec![
        add_role_button::command(),
        remove_role_button::command(),
        send_role_buttons::command(),
        send_role_buttons::init_roles_command(),
    ]
}
