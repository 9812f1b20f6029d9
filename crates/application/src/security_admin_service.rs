use std::sync::Arc;

use ventureos_core::{AppResult, Identity};
use ventureos_domain::{AuditAction, PermissionCategory};

use crate::{AuditEvent, AuditRepository, AuthorizationService, RoleRepository};

mod assignments;
mod roles;

/// Application service for role and assignment administration.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SecurityAdminService {
    /// Creates a new security admin service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_repository,
        }
    }

    async fn require_role_manage_permission(&self, actor: &Identity) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, PermissionCategory::Admin.as_str(), "manage_roles")
            .await
    }

    async fn append_audit_event(
        &self,
        actor: &Identity,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.email().to_owned(),
                action,
                resource_type: resource_type.to_owned(),
                resource_id: resource_id.to_owned(),
                detail: Some(detail),
            })
            .await
    }
}
