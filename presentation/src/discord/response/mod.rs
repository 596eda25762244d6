pub mod role_button;
pub mod unavailable;
