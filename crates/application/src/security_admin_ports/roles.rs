use ventureos_domain::{AssignmentScope, RolePermissions};

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Role name shown in the role editor.
    pub name: String,
    /// Optional role description.
    pub description: Option<String>,
    /// Grants to attach to the role.
    pub permissions: RolePermissions,
}

/// Input payload for replacing a role's name, description and grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New role name.
    pub name: String,
    /// New role description.
    pub description: Option<String>,
    /// Complete replacement grant set.
    pub permissions: RolePermissions,
}

/// Input payload for assigning a role to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRoleInput {
    /// Email of the assigned user.
    pub user_email: String,
    /// Role to assign.
    pub role_id: String,
    /// Assignment reach.
    pub scope: AssignmentScope,
    /// Resources covered by a resource specific assignment.
    pub resource_ids: Vec<String>,
}
