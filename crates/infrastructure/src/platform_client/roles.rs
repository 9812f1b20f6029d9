use async_trait::async_trait;
use reqwest::Method;
use ventureos_application::{AssignRoleInput, CreateRoleInput, RoleRepository, UpdateRoleInput};
use ventureos_core::{AppError, AppResult};
use ventureos_domain::{RoleAssignment, RoleDefinition};

use super::records::{
    assignment_body, create_role_body, decode_all, decode_assignment, decode_records, decode_role,
    update_role_body,
};
use super::{PlatformClient, ROLE_ASSIGNMENT_ENTITY, ROLE_ENTITY};

fn malformed(entity: &str) -> AppError {
    AppError::Internal(format!("platform returned a malformed {entity} record"))
}

impl PlatformClient {
    async fn list_assignment_records(
        &self,
        user_email: Option<&str>,
    ) -> AppResult<Vec<RoleAssignment>> {
        let mut url = self.entity_url(ROLE_ASSIGNMENT_ENTITY, None)?;
        if let Some(user_email) = user_email {
            url.query_pairs_mut().append_pair("user_email", user_email);
        }

        let value = self
            .send_entity_request(self.entity_request(Method::GET, url), "role assignments")
            .await?;
        let records = decode_records(value, ROLE_ASSIGNMENT_ENTITY)?;
        Ok(decode_all(records, ROLE_ASSIGNMENT_ENTITY, decode_assignment))
    }
}

#[async_trait]
impl RoleRepository for PlatformClient {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        let url = self.entity_url(ROLE_ENTITY, None)?;
        let value = self
            .send_entity_request(self.entity_request(Method::GET, url), "roles")
            .await?;
        let records = decode_records(value, ROLE_ENTITY)?;
        Ok(decode_all(records, ROLE_ENTITY, decode_role))
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<RoleDefinition>> {
        let url = self.entity_url(ROLE_ENTITY, Some(role_id))?;
        match self
            .send_entity_request(self.entity_request(Method::GET, url), "role")
            .await
        {
            Ok(value) => Ok(decode_role(&value)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let url = self.entity_url(ROLE_ENTITY, None)?;
        let request = self
            .entity_request(Method::POST, url)
            .json(&create_role_body(&input));
        let value = self.send_entity_request(request, "role creation").await?;
        decode_role(&value).ok_or_else(|| malformed(ROLE_ENTITY))
    }

    async fn update_role(
        &self,
        role_id: &str,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let url = self.entity_url(ROLE_ENTITY, Some(role_id))?;
        let request = self
            .entity_request(Method::PUT, url)
            .json(&update_role_body(&input));
        let value = self.send_entity_request(request, "role update").await?;
        decode_role(&value).ok_or_else(|| malformed(ROLE_ENTITY))
    }

    async fn delete_role(&self, role_id: &str) -> AppResult<()> {
        let url = self.entity_url(ROLE_ENTITY, Some(role_id))?;
        self.send_entity_request(self.entity_request(Method::DELETE, url), "role deletion")
            .await
            .map(|_| ())
    }

    async fn list_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        self.list_assignment_records(None).await
    }

    async fn list_assignments_for_user(
        &self,
        user_email: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        self.list_assignment_records(Some(user_email)).await
    }

    async fn create_assignment(&self, input: AssignRoleInput) -> AppResult<RoleAssignment> {
        let url = self.entity_url(ROLE_ASSIGNMENT_ENTITY, None)?;
        let request = self
            .entity_request(Method::POST, url)
            .json(&assignment_body(&input));
        let value = self
            .send_entity_request(request, "role assignment creation")
            .await?;
        decode_assignment(&value).ok_or_else(|| malformed(ROLE_ASSIGNMENT_ENTITY))
    }

    async fn delete_assignment(&self, assignment_id: &str) -> AppResult<()> {
        let url = self.entity_url(ROLE_ASSIGNMENT_ENTITY, Some(assignment_id))?;
        self.send_entity_request(
            self.entity_request(Method::DELETE, url),
            "role assignment deletion",
        )
        .await
        .map(|_| ())
    }
}
