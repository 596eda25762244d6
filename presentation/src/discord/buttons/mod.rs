pub mod role_button;
