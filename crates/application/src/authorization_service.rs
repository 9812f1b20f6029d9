use std::sync::Arc;

use tracing::{debug, warn};
use ventureos_core::{AppResult, Identity};
use ventureos_domain::permission_resolver;

use crate::RoleRepository;

mod access_context;
mod permissions;

pub use access_context::AccessContext;

/// Application service for role-based authorization checks.
///
/// Fetches role data through [`RoleRepository`] and hands it to the pure
/// resolver. Nothing is cached between calls.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn RoleRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Loads the identity's assignments and the role definitions they need.
    ///
    /// Privileged identities skip the fetch since the resolver never reads
    /// their role data.
    pub async fn load_access_context(&self, identity: &Identity) -> AppResult<AccessContext> {
        if identity.is_privileged() {
            return Ok(AccessContext::new(identity.clone(), Vec::new(), Vec::new()));
        }

        let assignments = self
            .repository
            .list_assignments_for_user(identity.source_email())
            .await?;
        let roles = if assignments.is_empty() {
            Vec::new()
        } else {
            self.repository.list_roles().await?
        };

        let dangling = permission_resolver::dangling_role_ids(&assignments, &roles);
        if !dangling.is_empty() {
            warn!(
                user_email = %identity.email(),
                role_ids = ?dangling,
                "role assignments reference missing role definitions"
            );
        }

        debug!(
            user_email = %identity.email(),
            assignment_count = assignments.len(),
            role_count = roles.len(),
            "loaded access context"
        );

        Ok(AccessContext::new(identity.clone(), assignments, roles))
    }

    /// Reloads a context for the same identity.
    pub async fn refresh(&self, context: &AccessContext) -> AppResult<AccessContext> {
        self.load_access_context(context.identity()).await
    }
}
