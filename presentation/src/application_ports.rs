use application_ports::role_button::RoleButtonPort;

pub trait Locator {
    fn get_role_button_port(&self) -> &(dyn RoleButtonPort + Send + Sync);
}
