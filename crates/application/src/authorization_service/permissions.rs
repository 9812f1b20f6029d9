use ventureos_core::AppError;

use super::*;

impl AuthorizationService {
    /// Returns whether the identity currently holds the permission.
    pub async fn has_permission(
        &self,
        identity: &Identity,
        category: &str,
        permission: &str,
    ) -> AppResult<bool> {
        if identity.is_privileged() {
            return Ok(true);
        }

        let context = self.load_access_context(identity).await?;
        Ok(context.has_permission(category, permission))
    }

    /// Ensures the identity holds the permission.
    pub async fn require_permission(
        &self,
        identity: &Identity,
        category: &str,
        permission: &str,
    ) -> AppResult<()> {
        if self.has_permission(identity, category, permission).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "'{}' is missing permission '{category}.{permission}'",
            identity.email()
        )))
    }

    /// Returns whether the identity may open the resource.
    pub async fn can_access_resource(
        &self,
        identity: &Identity,
        resource_id: &str,
    ) -> AppResult<bool> {
        if identity.is_privileged() {
            return Ok(true);
        }

        let assignments = self
            .repository
            .list_assignments_for_user(identity.source_email())
            .await?;

        Ok(permission_resolver::can_access_resource(
            Some(identity),
            &assignments,
            resource_id,
        ))
    }

    /// Ensures the identity may open the resource.
    pub async fn require_resource_access(
        &self,
        identity: &Identity,
        resource_id: &str,
    ) -> AppResult<()> {
        if self.can_access_resource(identity, resource_id).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "'{}' has no access to resource '{resource_id}'",
            identity.email()
        )))
    }
}
