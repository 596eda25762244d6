pub mod discord;
pub mod role_button;
