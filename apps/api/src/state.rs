use std::sync::Arc;

use ventureos_application::{AuthorizationService, IdentityProvider, SecurityAdminService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub security_admin_service: SecurityAdminService,
    pub identity_provider: Arc<dyn IdentityProvider>,
}
