use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{PermissionCategory, RolePermissions};

/// Grants merged across every role an identity holds.
///
/// Only grants are recorded; a pair that is absent is denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMap(BTreeMap<String, BTreeMap<String, bool>>);

impl CapabilityMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a map granting every pair of the canonical taxonomy.
    #[must_use]
    pub fn full() -> Self {
        let mut capabilities = Self::new();
        for category in PermissionCategory::all() {
            for permission in category.permissions() {
                capabilities.grant(category.as_str(), permission);
            }
        }

        capabilities
    }

    /// Records one grant.
    pub fn grant(&mut self, category: &str, permission: &str) {
        self.0
            .entry(category.to_owned())
            .or_default()
            .insert(permission.to_owned(), true);
    }

    /// Adds every grant of a role. Existing grants are never removed.
    pub fn merge_role(&mut self, permissions: &RolePermissions) {
        for (category, permission) in permissions.granted() {
            self.grant(category, permission);
        }
    }

    /// Returns whether the pair was granted.
    #[must_use]
    pub fn allows(&self, category: &str, permission: &str) -> bool {
        self.0
            .get(category)
            .and_then(|permissions| permissions.get(permission))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over every granted pair in sorted order.
    pub fn granted(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(category, permissions)| {
            permissions
                .keys()
                .map(move |permission| (category.as_str(), permission.as_str()))
        })
    }
}

/// Resources an identity may open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "resource_ids", rename_all = "snake_case")]
pub enum ResourceAccess {
    /// Every resource.
    All,
    /// Only the listed resources.
    Only(BTreeSet<String>),
    /// No resource.
    Denied,
}
