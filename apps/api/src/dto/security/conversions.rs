use ventureos_application::{AssignRoleInput, CreateRoleInput, UpdateRoleInput};
use ventureos_core::{AppError, AppResult};
use ventureos_domain::{AssignmentScope, RoleAssignment, RoleDefinition, RolePermissions};

use super::{
    AssignRoleRequest, CreateRoleRequest, RoleAssignmentResponse, RoleResponse, UpdateRoleRequest,
};
use crate::dto::{GrantTable, grant_table};

fn role_permissions(table: GrantTable) -> RolePermissions {
    let mut permissions = RolePermissions::new();
    for (category, entries) in table {
        for (permission, granted) in entries {
            permissions.set(category.as_str(), permission.as_str(), granted);
        }
    }

    permissions
}

/// Request scopes are strict; only stored records decode leniently.
fn parse_scope(value: &str) -> AppResult<AssignmentScope> {
    match value {
        "global" => Ok(AssignmentScope::Global),
        "resource_specific" => Ok(AssignmentScope::ResourceSpecific),
        other => Err(AppError::Validation(format!(
            "scope must be 'global' or 'resource_specific', got '{other}'"
        ))),
    }
}

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(request: CreateRoleRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            permissions: role_permissions(request.permissions),
        }
    }
}

impl From<UpdateRoleRequest> for UpdateRoleInput {
    fn from(request: UpdateRoleRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            permissions: role_permissions(request.permissions),
        }
    }
}

impl TryFrom<AssignRoleRequest> for AssignRoleInput {
    type Error = AppError;

    fn try_from(request: AssignRoleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_email: request.user_email,
            role_id: request.role_id,
            scope: parse_scope(request.scope.trim())?,
            resource_ids: request.resource_ids,
        })
    }
}

impl From<RoleDefinition> for RoleResponse {
    fn from(role: RoleDefinition) -> Self {
        Self {
            permissions: grant_table(role.permissions.granted()),
            role_id: role.role_id,
            name: role.name,
            description: role.description,
        }
    }
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(assignment: RoleAssignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id,
            user_email: assignment.user_email,
            role_id: assignment.role_id,
            scope: assignment.scope.as_str().to_owned(),
            resource_ids: assignment.resource_ids,
            assigned_at: assignment.assigned_at,
        }
    }
}
