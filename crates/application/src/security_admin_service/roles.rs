use super::*;

use tracing::info;
use ventureos_core::{AppError, NonEmptyString};
use ventureos_domain::{RoleDefinition, RolePermissions, validate_permission_pair};

use crate::{CreateRoleInput, UpdateRoleInput};

impl SecurityAdminService {
    /// Returns every role definition.
    pub async fn list_roles(&self, actor: &Identity) -> AppResult<Vec<RoleDefinition>> {
        self.require_role_manage_permission(actor).await?;
        let mut roles = self.repository.list_roles().await?;
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(roles)
    }

    /// Creates a role and emits an audit event.
    pub async fn create_role(
        &self,
        actor: &Identity,
        input: CreateRoleInput,
    ) -> AppResult<RoleDefinition> {
        self.require_role_manage_permission(actor).await?;

        let name = NonEmptyString::new(input.name)?;
        validate_grants(&input.permissions)?;

        let role = self
            .repository
            .create_role(CreateRoleInput {
                name: name.into(),
                description: normalize_description(input.description),
                permissions: input.permissions,
            })
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::SecurityRoleCreated,
            "role",
            role.role_id.as_str(),
            format!("created role '{}'", role.name),
        )
        .await?;

        info!(actor = %actor.email(), role_id = %role.role_id, "role created");
        Ok(role)
    }

    /// Replaces a role's name, description and grants.
    pub async fn update_role(
        &self,
        actor: &Identity,
        role_id: &str,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        self.require_role_manage_permission(actor).await?;

        let name = NonEmptyString::new(input.name)?;
        validate_grants(&input.permissions)?;
        self.require_existing_role(role_id).await?;

        let role = self
            .repository
            .update_role(
                role_id,
                UpdateRoleInput {
                    name: name.into(),
                    description: normalize_description(input.description),
                    permissions: input.permissions,
                },
            )
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::SecurityRoleUpdated,
            "role",
            role_id,
            format!("updated role '{}'", role.name),
        )
        .await?;

        Ok(role)
    }

    /// Deletes a role that no assignment references.
    pub async fn delete_role(&self, actor: &Identity, role_id: &str) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        let role = self.require_existing_role(role_id).await?;
        let in_use = self
            .repository
            .list_assignments()
            .await?
            .iter()
            .filter(|assignment| assignment.role_id == role_id)
            .count();
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "role '{}' is still assigned {in_use} time(s)",
                role.name
            )));
        }

        self.repository.delete_role(role_id).await?;

        self.append_audit_event(
            actor,
            AuditAction::SecurityRoleDeleted,
            "role",
            role_id,
            format!("deleted role '{}'", role.name),
        )
        .await
    }

    pub(super) async fn require_existing_role(&self, role_id: &str) -> AppResult<RoleDefinition> {
        self.repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }
}

fn validate_grants(permissions: &RolePermissions) -> AppResult<()> {
    for (category, permission) in permissions.granted() {
        validate_permission_pair(category, permission)?;
    }

    Ok(())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
