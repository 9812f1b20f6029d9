use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use ventureos_application::{AssignRoleInput, CreateRoleInput, RoleRepository, UpdateRoleInput};
use ventureos_core::{AppError, AppResult};
use ventureos_domain::{RoleAssignment, RoleDefinition};

/// In-memory role and assignment store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<String, RoleDefinition>>,
    assignments: RwLock<HashMap<String, RoleAssignment>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
        }
    }
}

fn ensure_unique_name(
    roles: &HashMap<String, RoleDefinition>,
    name: &str,
    except_role_id: Option<&str>,
) -> AppResult<()> {
    let taken = roles.values().any(|role| {
        role.name.eq_ignore_ascii_case(name) && Some(role.role_id.as_str()) != except_role_id
    });
    if taken {
        return Err(AppError::Conflict(format!("role '{name}' already exists")));
    }

    Ok(())
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        let roles = self.roles.read().await;
        let mut values: Vec<RoleDefinition> = roles.values().cloned().collect();
        values.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(values)
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<RoleDefinition>> {
        Ok(self.roles.read().await.get(role_id).cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;
        ensure_unique_name(&roles, input.name.as_str(), None)?;

        let role = RoleDefinition {
            role_id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            permissions: input.permissions,
        };
        roles.insert(role.role_id.clone(), role.clone());
        Ok(role)
    }

    async fn update_role(
        &self,
        role_id: &str,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;
        ensure_unique_name(&roles, input.name.as_str(), Some(role_id))?;

        let role = roles
            .get_mut(role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;
        role.name = input.name;
        role.description = input.description;
        role.permissions = input.permissions;
        Ok(role.clone())
    }

    async fn delete_role(&self, role_id: &str) -> AppResult<()> {
        self.roles
            .write()
            .await
            .remove(role_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        let assignments = self.assignments.read().await;
        let mut values: Vec<RoleAssignment> = assignments.values().cloned().collect();
        values.sort_by(|left, right| {
            left.assigned_at
                .cmp(&right.assigned_at)
                .then_with(|| left.assignment_id.cmp(&right.assignment_id))
        });
        Ok(values)
    }

    async fn list_assignments_for_user(
        &self,
        user_email: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        let mut values = self.list_assignments().await?;
        values.retain(|assignment| assignment.user_email.eq_ignore_ascii_case(user_email));
        Ok(values)
    }

    async fn create_assignment(&self, input: AssignRoleInput) -> AppResult<RoleAssignment> {
        let assignment = RoleAssignment {
            assignment_id: Uuid::new_v4().to_string(),
            user_email: input.user_email,
            role_id: input.role_id,
            scope: input.scope,
            resource_ids: input.resource_ids,
            assigned_at: Some(Utc::now().to_rfc3339()),
        };

        self.assignments
            .write()
            .await
            .insert(assignment.assignment_id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, assignment_id: &str) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .remove(assignment_id)
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!("assignment '{assignment_id}' does not exist"))
            })
    }
}
