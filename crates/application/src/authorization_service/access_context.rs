use chrono::{DateTime, Utc};
use ventureos_core::Identity;
use ventureos_domain::{
    CapabilityMap, ResourceAccess, RoleAssignment, RoleDefinition, permission_resolver,
};

/// Snapshot of one identity's role data, loaded together.
///
/// The snapshot never refetches. Build a new one through
/// `AuthorizationService::refresh` when role data may have changed.
#[derive(Debug, Clone)]
pub struct AccessContext {
    identity: Identity,
    assignments: Vec<RoleAssignment>,
    roles: Vec<RoleDefinition>,
    loaded_at: DateTime<Utc>,
}

impl AccessContext {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(
        identity: Identity,
        assignments: Vec<RoleAssignment>,
        roles: Vec<RoleDefinition>,
    ) -> Self {
        Self {
            identity,
            assignments,
            roles,
            loaded_at: Utc::now(),
        }
    }

    /// Returns the identity the snapshot was loaded for.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the identity's assignments.
    #[must_use]
    pub fn assignments(&self) -> &[RoleAssignment] {
        &self.assignments
    }

    /// Returns when the snapshot was loaded.
    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Returns whether the identity bypasses role checks.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        permission_resolver::is_privileged(Some(&self.identity))
    }

    /// Returns merged grants, or `None` when no role data applies.
    #[must_use]
    pub fn capabilities(&self) -> Option<CapabilityMap> {
        permission_resolver::resolve_capabilities(
            Some(&self.identity),
            &self.assignments,
            &self.roles,
        )
    }

    /// Returns whether the identity holds `permission` in `category`.
    #[must_use]
    pub fn has_permission(&self, category: &str, permission: &str) -> bool {
        permission_resolver::has_permission(
            Some(&self.identity),
            &self.assignments,
            &self.roles,
            category,
            permission,
        )
    }

    /// Returns whether the identity may open `resource_id`.
    #[must_use]
    pub fn can_access_resource(&self, resource_id: &str) -> bool {
        permission_resolver::can_access_resource(
            Some(&self.identity),
            &self.assignments,
            resource_id,
        )
    }

    /// Returns the resources the identity may open.
    #[must_use]
    pub fn accessible_resources(&self) -> ResourceAccess {
        permission_resolver::accessible_resources(Some(&self.identity), &self.assignments)
    }
}
