use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ventureos_core::AppError;

/// Permission categories known to the studio workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    /// Venture portfolio records.
    Ventures,
    /// Tasks and workflow boards.
    Tasks,
    /// Documents and the content hub.
    Documents,
    /// Comments, mentions and shared spaces.
    Collaboration,
    /// Dashboards and generated reports.
    Analytics,
    /// Workspace administration.
    Admin,
}

const CRUD_PERMISSIONS: &[&str] = &["view", "create", "edit", "delete"];
const ANALYTICS_PERMISSIONS: &[&str] = &["view", "export"];
const ADMIN_PERMISSIONS: &[&str] = &["manage_users", "manage_roles", "manage_settings"];

impl PermissionCategory {
    /// Returns a stable storage value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ventures => "ventures",
            Self::Tasks => "tasks",
            Self::Documents => "documents",
            Self::Collaboration => "collaboration",
            Self::Analytics => "analytics",
            Self::Admin => "admin",
        }
    }

    /// Returns all known categories.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionCategory] = &[
            PermissionCategory::Ventures,
            PermissionCategory::Tasks,
            PermissionCategory::Documents,
            PermissionCategory::Collaboration,
            PermissionCategory::Analytics,
            PermissionCategory::Admin,
        ];

        ALL
    }

    /// Returns the permission names that can be granted in this category.
    #[must_use]
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Ventures | Self::Tasks | Self::Documents | Self::Collaboration => {
                CRUD_PERMISSIONS
            }
            Self::Analytics => ANALYTICS_PERMISSIONS,
            Self::Admin => ADMIN_PERMISSIONS,
        }
    }

    /// Returns whether `permission` belongs to this category.
    #[must_use]
    pub fn supports(&self, permission: &str) -> bool {
        self.permissions().contains(&permission)
    }

    /// Parses a transport value into a category.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for PermissionCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ventures" => Ok(Self::Ventures),
            "tasks" => Ok(Self::Tasks),
            "documents" => Ok(Self::Documents),
            "collaboration" => Ok(Self::Collaboration),
            "analytics" => Ok(Self::Analytics),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!(
                "unknown permission category '{value}'"
            ))),
        }
    }
}

/// Ensures a category/permission pair belongs to the canonical taxonomy.
pub fn validate_permission_pair(category: &str, permission: &str) -> Result<(), AppError> {
    let parsed = PermissionCategory::from_transport(category)?;
    if parsed.supports(permission) {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "unknown permission '{permission}' in category '{category}'"
    )))
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role definition is created.
    SecurityRoleCreated,
    /// Emitted when a role definition is edited.
    SecurityRoleUpdated,
    /// Emitted when a role definition is deleted.
    SecurityRoleDeleted,
    /// Emitted when a role is assigned to a user.
    SecurityRoleAssigned,
    /// Emitted when a role assignment is removed.
    SecurityRoleUnassigned,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityRoleCreated => "security.role.created",
            Self::SecurityRoleUpdated => "security.role.updated",
            Self::SecurityRoleDeleted => "security.role.deleted",
            Self::SecurityRoleAssigned => "security.role.assigned",
            Self::SecurityRoleUnassigned => "security.role.unassigned",
        }
    }
}
