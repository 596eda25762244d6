pub mod ports;
pub mod role_button;
