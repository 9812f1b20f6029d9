use std::sync::Arc;

use tracing::{info, warn};
use ventureos_application::{
    AuditRepository, AuthorizationService, IdentityProvider, RoleRepository, SecurityAdminService,
};
use ventureos_core::AppResult;
use ventureos_infrastructure::{
    InMemoryRoleRepository, PlatformClient, StaticIdentityProvider, TracingAuditRepository,
};

use crate::api_config::{ApiConfig, RoleStoreConfig};
use crate::dev_seed;
use crate::state::AppState;

pub async fn build_app_state(config: &ApiConfig) -> AppResult<AppState> {
    let audit_repository: Arc<dyn AuditRepository> = Arc::new(TracingAuditRepository::new());

    match &config.role_store {
        RoleStoreConfig::Platform(platform_config) => {
            let client = Arc::new(PlatformClient::new(platform_config.clone())?);
            info!(base_url = %platform_config.base_url, "using platform role store");
            Ok(assemble_app_state(
                client.clone(),
                client,
                audit_repository,
            ))
        }
        RoleStoreConfig::Memory { seed } => {
            let repository = Arc::new(InMemoryRoleRepository::new());
            let identity_provider = if *seed {
                dev_seed::run(repository.as_ref()).await?
            } else {
                warn!("in-memory role store without DEV_SEED rejects every access token");
                StaticIdentityProvider::new()
            };

            Ok(assemble_app_state(
                repository,
                Arc::new(identity_provider),
                audit_repository,
            ))
        }
    }
}

pub fn assemble_app_state(
    repository: Arc<dyn RoleRepository>,
    identity_provider: Arc<dyn IdentityProvider>,
    audit_repository: Arc<dyn AuditRepository>,
) -> AppState {
    let authorization_service = AuthorizationService::new(repository.clone());
    let security_admin_service =
        SecurityAdminService::new(authorization_service.clone(), repository, audit_repository);

    AppState {
        authorization_service,
        security_admin_service,
        identity_provider,
    }
}
