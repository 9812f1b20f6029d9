use async_trait::async_trait;

use ventureos_core::AppResult;
use ventureos_domain::{RoleAssignment, RoleDefinition};

use super::roles::{AssignRoleInput, CreateRoleInput, UpdateRoleInput};

/// Repository port for role definitions and assignments.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists every role definition.
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Finds one role definition.
    async fn find_role(&self, role_id: &str) -> AppResult<Option<RoleDefinition>>;

    /// Creates a role and returns the stored definition.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition>;

    /// Replaces a role's name, description and grants.
    async fn update_role(&self, role_id: &str, input: UpdateRoleInput)
    -> AppResult<RoleDefinition>;

    /// Deletes a role definition.
    async fn delete_role(&self, role_id: &str) -> AppResult<()>;

    /// Lists every role assignment.
    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignment>>;

    /// Lists assignments held by one user.
    ///
    /// `user_email` is passed as the identity provider spelled it.
    async fn list_assignments_for_user(&self, user_email: &str)
    -> AppResult<Vec<RoleAssignment>>;

    /// Creates an assignment and returns the stored record.
    async fn create_assignment(&self, input: AssignRoleInput) -> AppResult<RoleAssignment>;

    /// Deletes an assignment.
    async fn delete_assignment(&self, assignment_id: &str) -> AppResult<()>;
}
