//! Hand-written port fakes shared by service tests.

use async_trait::async_trait;
use tokio::sync::Mutex;
use ventureos_core::{AppError, AppResult};
use ventureos_domain::{RoleAssignment, RoleDefinition};

use crate::{
    AssignRoleInput, AuditEvent, AuditRepository, CreateRoleInput, RoleRepository,
    UpdateRoleInput,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeRoleRepository {
    pub(crate) roles: Mutex<Vec<RoleDefinition>>,
    pub(crate) assignments: Mutex<Vec<RoleAssignment>>,
    pub(crate) role_list_calls: Mutex<usize>,
    pub(crate) assignment_queries: Mutex<Vec<String>>,
}

impl FakeRoleRepository {
    pub(crate) fn with(roles: Vec<RoleDefinition>, assignments: Vec<RoleAssignment>) -> Self {
        Self {
            roles: Mutex::new(roles),
            assignments: Mutex::new(assignments),
            role_list_calls: Mutex::new(0),
            assignment_queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        *self.role_list_calls.lock().await += 1;
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<RoleDefinition>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.role_id == role_id)
            .cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.lock().await;
        let role = RoleDefinition {
            role_id: format!("role-{}", roles.len() + 1),
            name: input.name,
            description: input.description,
            permissions: input.permissions,
        };
        roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(
        &self,
        role_id: &str,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.lock().await;
        let role = roles
            .iter_mut()
            .find(|role| role.role_id == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;
        role.name = input.name;
        role.description = input.description;
        role.permissions = input.permissions;
        Ok(role.clone())
    }

    async fn delete_role(&self, role_id: &str) -> AppResult<()> {
        self.roles
            .lock()
            .await
            .retain(|role| role.role_id != role_id);
        Ok(())
    }

    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        Ok(self.assignments.lock().await.clone())
    }

    async fn list_assignments_for_user(
        &self,
        user_email: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        self.assignment_queries
            .lock()
            .await
            .push(user_email.to_owned());
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.user_email.eq_ignore_ascii_case(user_email))
            .cloned()
            .collect())
    }

    async fn create_assignment(&self, input: AssignRoleInput) -> AppResult<RoleAssignment> {
        let mut assignments = self.assignments.lock().await;
        let assignment = RoleAssignment {
            assignment_id: format!("assignment-{}", assignments.len() + 1),
            user_email: input.user_email,
            role_id: input.role_id,
            scope: input.scope,
            resource_ids: input.resource_ids,
            assigned_at: None,
        };
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, assignment_id: &str) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        let before = assignments.len();
        assignments.retain(|assignment| assignment.assignment_id != assignment_id);
        if assignments.len() == before {
            return Err(AppError::NotFound(format!(
                "assignment '{assignment_id}' does not exist"
            )));
        }
        Ok(())
    }
}

/// Repository whose every call fails, for error propagation tests.
pub(crate) struct FailingRoleRepository;

#[async_trait]
impl RoleRepository for FailingRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        Err(unavailable())
    }

    async fn find_role(&self, _role_id: &str) -> AppResult<Option<RoleDefinition>> {
        Err(unavailable())
    }

    async fn create_role(&self, _input: CreateRoleInput) -> AppResult<RoleDefinition> {
        Err(unavailable())
    }

    async fn update_role(
        &self,
        _role_id: &str,
        _input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        Err(unavailable())
    }

    async fn delete_role(&self, _role_id: &str) -> AppResult<()> {
        Err(unavailable())
    }

    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        Err(unavailable())
    }

    async fn list_assignments_for_user(
        &self,
        _user_email: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        Err(unavailable())
    }

    async fn create_assignment(&self, _input: AssignRoleInput) -> AppResult<RoleAssignment> {
        Err(unavailable())
    }

    async fn delete_assignment(&self, _assignment_id: &str) -> AppResult<()> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::Internal("role store unavailable".to_owned())
}
