use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ventureos_core::Identity;

/// Grants carried by one role: category -> permission -> granted.
///
/// Decoding is lenient. Only the JSON literal `true` grants a permission; any
/// other value is kept as `false`, and categories that are not objects are
/// dropped. A missing key is equivalent to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RolePermissions(BTreeMap<String, BTreeMap<String, bool>>);

impl RolePermissions {
    /// Creates an empty grant set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds grants from an untyped JSON document.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(categories) = value.as_object() else {
            return Self::default();
        };

        let entries = categories
            .iter()
            .filter_map(|(category, permissions)| {
                let permissions = permissions.as_object()?;
                let flags = permissions
                    .iter()
                    .map(|(permission, flag)| {
                        (permission.clone(), matches!(flag, Value::Bool(true)))
                    })
                    .collect();
                Some((category.clone(), flags))
            })
            .collect();

        Self(entries)
    }

    /// Returns a copy with one additional grant.
    #[must_use]
    pub fn with_grant(mut self, category: &str, permission: &str) -> Self {
        self.set(category, permission, true);
        self
    }

    /// Sets one flag.
    pub fn set(&mut self, category: &str, permission: &str, granted: bool) {
        self.0
            .entry(category.to_owned())
            .or_default()
            .insert(permission.to_owned(), granted);
    }

    /// Returns whether the pair is explicitly granted.
    #[must_use]
    pub fn is_granted(&self, category: &str, permission: &str) -> bool {
        self.0
            .get(category)
            .and_then(|permissions| permissions.get(permission))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over every granted `(category, permission)` pair.
    pub fn granted(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(category, permissions)| {
            permissions
                .iter()
                .filter(|(_, granted)| **granted)
                .map(move |(permission, _)| (category.as_str(), permission.as_str()))
        })
    }
}

impl<'de> Deserialize<'de> for RolePermissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Named bundle of grants that can be assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Stable role identifier.
    pub role_id: String,
    /// Human readable role name.
    pub name: String,
    /// Optional description shown in the role editor.
    #[serde(default)]
    pub description: Option<String>,
    /// Category/permission grants.
    #[serde(default)]
    pub permissions: RolePermissions,
}

/// Reach of a role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentScope {
    /// Applies to every resource.
    Global,
    /// Applies only to the listed resource ids.
    ResourceSpecific,
}

impl AssignmentScope {
    /// Returns a stable storage value for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::ResourceSpecific => "resource_specific",
        }
    }

    /// Parses a stored scope. Unrecognised values never widen to global.
    #[must_use]
    pub fn from_transport(value: &str) -> Self {
        if value == "global" {
            Self::Global
        } else {
            Self::ResourceSpecific
        }
    }
}

/// Link from a user to a role, with an access scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Stable assignment identifier.
    pub assignment_id: String,
    /// Email of the assigned user.
    pub user_email: String,
    /// Assigned role identifier.
    pub role_id: String,
    /// Assignment reach.
    pub scope: AssignmentScope,
    /// Resource ids covered when the scope is resource specific.
    #[serde(default)]
    pub resource_ids: Vec<String>,
    /// Assignment timestamp in RFC3339, when known.
    #[serde(default)]
    pub assigned_at: Option<String>,
}

impl RoleAssignment {
    /// Returns whether this assignment belongs to `identity`.
    #[must_use]
    pub fn belongs_to(&self, identity: &Identity) -> bool {
        identity.matches_email(self.user_email.as_str())
    }

    /// Returns whether the assignment reaches `resource_id`.
    #[must_use]
    pub fn covers_resource(&self, resource_id: &str) -> bool {
        match self.scope {
            AssignmentScope::Global => true,
            AssignmentScope::ResourceSpecific => {
                self.resource_ids.iter().any(|value| value == resource_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use ventureos_core::{Identity, PlatformRole};

    use super::{AssignmentScope, RoleAssignment, RolePermissions};

    #[test]
    fn non_boolean_flags_are_falsy() {
        let permissions = RolePermissions::from_json(&json!({
            "ventures": { "view": true, "edit": "true", "delete": 1, "create": null },
            "tasks": true,
            "documents": { "view": { "nested": true } }
        }));

        assert!(permissions.is_granted("ventures", "view"));
        assert!(!permissions.is_granted("ventures", "edit"));
        assert!(!permissions.is_granted("ventures", "delete"));
        assert!(!permissions.is_granted("ventures", "create"));
        assert!(!permissions.is_granted("tasks", "view"));
        assert!(!permissions.is_granted("documents", "view"));
        assert_eq!(permissions.granted().count(), 1);
    }

    #[test]
    fn non_object_document_has_no_grants() {
        assert_eq!(
            RolePermissions::from_json(&json!(["ventures"])),
            RolePermissions::new()
        );
    }

    #[test]
    fn permissions_deserialize_leniently() {
        let permissions: RolePermissions =
            serde_json::from_value(json!({ "analytics": { "view": true, "export": "yes" } }))
                .unwrap_or_default();
        assert!(permissions.is_granted("analytics", "view"));
        assert!(!permissions.is_granted("analytics", "export"));
    }

    #[test]
    fn unknown_scope_is_resource_specific() {
        assert_eq!(AssignmentScope::from_transport("global"), AssignmentScope::Global);
        assert_eq!(
            AssignmentScope::from_transport("everything"),
            AssignmentScope::ResourceSpecific
        );
    }

    #[test]
    fn global_assignment_ignores_resource_ids() {
        let assignment = RoleAssignment {
            assignment_id: "a1".to_owned(),
            user_email: "Ana@Studio.io".to_owned(),
            role_id: "r1".to_owned(),
            scope: AssignmentScope::Global,
            resource_ids: vec!["v1".to_owned()],
            assigned_at: None,
        };

        assert!(assignment.covers_resource("v9"));
        assert!(assignment.belongs_to(&Identity::new("ana@studio.io", None, PlatformRole::User)));
    }
}
