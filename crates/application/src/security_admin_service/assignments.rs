use super::*;

use tracing::info;
use ventureos_core::{AppError, NonEmptyString};
use ventureos_domain::{AssignmentScope, RoleAssignment};

use crate::AssignRoleInput;

impl SecurityAdminService {
    /// Returns every role assignment.
    pub async fn list_role_assignments(
        &self,
        actor: &Identity,
    ) -> AppResult<Vec<RoleAssignment>> {
        self.require_role_manage_permission(actor).await?;
        self.repository.list_assignments().await
    }

    /// Assigns a role to a user and emits an audit event.
    ///
    /// Global assignments drop any resource ids. Resource specific assignments
    /// need at least one resource id.
    pub async fn assign_role(
        &self,
        actor: &Identity,
        input: AssignRoleInput,
    ) -> AppResult<RoleAssignment> {
        self.require_role_manage_permission(actor).await?;

        let user_email = NonEmptyString::new(input.user_email)?
            .as_str()
            .to_lowercase();
        let resource_ids = normalize_resource_ids(input.scope, input.resource_ids)?;
        let role = self.require_existing_role(input.role_id.as_str()).await?;

        let assignment = self
            .repository
            .create_assignment(AssignRoleInput {
                user_email,
                role_id: role.role_id.clone(),
                scope: input.scope,
                resource_ids,
            })
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::SecurityRoleAssigned,
            "role_assignment",
            assignment.assignment_id.as_str(),
            format!(
                "assigned role '{}' to '{}' ({})",
                role.name,
                assignment.user_email,
                assignment.scope.as_str()
            ),
        )
        .await?;

        info!(
            actor = %actor.email(),
            user_email = %assignment.user_email,
            role_id = %assignment.role_id,
            scope = assignment.scope.as_str(),
            "role assigned"
        );
        Ok(assignment)
    }

    /// Removes a role assignment and emits an audit event.
    pub async fn unassign_role(&self, actor: &Identity, assignment_id: &str) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        self.repository.delete_assignment(assignment_id).await?;

        self.append_audit_event(
            actor,
            AuditAction::SecurityRoleUnassigned,
            "role_assignment",
            assignment_id,
            format!("removed role assignment '{assignment_id}'"),
        )
        .await
    }
}

fn normalize_resource_ids(
    scope: AssignmentScope,
    resource_ids: Vec<String>,
) -> AppResult<Vec<String>> {
    if scope == AssignmentScope::Global {
        return Ok(Vec::new());
    }

    let mut normalized: Vec<String> = Vec::with_capacity(resource_ids.len());
    for resource_id in resource_ids {
        let resource_id = resource_id.trim();
        if !resource_id.is_empty() && !normalized.iter().any(|value| value == resource_id) {
            normalized.push(resource_id.to_owned());
        }
    }

    if normalized.is_empty() {
        return Err(AppError::Validation(
            "resource_specific assignments require at least one resource id".to_owned(),
        ));
    }

    Ok(normalized)
}
