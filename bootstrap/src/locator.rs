use application::role_button::RoleButtonService;
use application_ports::role_button::RoleButtonPort;
use presentation::application_ports::Locator;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    role_button_adapter: Arc<RoleButtonService>,
}

impl ApplicationPortLocator {
    #[instrument(level = "trace", skip_all)]
    pub fn new(role_button_adapter: Arc<RoleButtonService>) -> Self {
        Self {
            role_button_adapter,
        }
    }
}

impl Locator for ApplicationPortLocator {
    #[instrument(level = "trace", skip(self))]
    fn get_role_button_port(&self) -> &(dyn RoleButtonPort + Send + Sync) {
        &*self.role_button_adapter
    }
}
