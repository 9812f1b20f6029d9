//! Pure authorization decisions over identity and role records.
//!
//! Every function here is deterministic and side-effect free. Missing or
//! inconsistent input always resolves to the most restrictive answer.
//! Assignments that belong to a different email than the identity are ignored.

use std::collections::BTreeSet;

use ventureos_core::Identity;

use crate::{AssignmentScope, CapabilityMap, ResourceAccess, RoleAssignment, RoleDefinition};

/// Returns whether the identity bypasses role-based checks.
#[must_use]
pub fn is_privileged(identity: Option<&Identity>) -> bool {
    identity.is_some_and(Identity::is_privileged)
}

/// Merges the grants of every role held by the identity.
///
/// Returns `None` when no permission data can be resolved: the identity is
/// absent or holds no assignments. Callers must treat `None` as deny-all.
/// Assignments that reference unknown roles contribute nothing.
#[must_use]
pub fn resolve_capabilities(
    identity: Option<&Identity>,
    assignments: &[RoleAssignment],
    roles: &[RoleDefinition],
) -> Option<CapabilityMap> {
    let identity = identity?;
    if identity.is_privileged() {
        return Some(CapabilityMap::full());
    }

    let mut owned = owned_assignments(identity, assignments).peekable();
    owned.peek()?;

    let mut capabilities = CapabilityMap::new();
    for assignment in owned {
        // Every definition sharing the id is merged.
        for role in roles
            .iter()
            .filter(|role| role.role_id == assignment.role_id)
        {
            capabilities.merge_role(&role.permissions);
        }
    }

    Some(capabilities)
}

/// Returns whether the identity holds `permission` in `category`.
#[must_use]
pub fn has_permission(
    identity: Option<&Identity>,
    assignments: &[RoleAssignment],
    roles: &[RoleDefinition],
    category: &str,
    permission: &str,
) -> bool {
    if is_privileged(identity) {
        return true;
    }

    resolve_capabilities(identity, assignments, roles)
        .is_some_and(|capabilities| capabilities.allows(category, permission))
}

/// Returns whether the identity may open the resource `resource_id`.
///
/// Resource scope is independent from capability grants. Callers that care
/// about both must check both.
#[must_use]
pub fn can_access_resource(
    identity: Option<&Identity>,
    assignments: &[RoleAssignment],
    resource_id: &str,
) -> bool {
    let Some(identity) = identity else {
        return false;
    };
    if identity.is_privileged() {
        return true;
    }

    owned_assignments(identity, assignments)
        .any(|assignment| assignment.covers_resource(resource_id))
}

/// Summarises which resources the identity may open.
#[must_use]
pub fn accessible_resources(
    identity: Option<&Identity>,
    assignments: &[RoleAssignment],
) -> ResourceAccess {
    let Some(identity) = identity else {
        return ResourceAccess::Denied;
    };
    if identity.is_privileged() {
        return ResourceAccess::All;
    }

    let mut resource_ids = BTreeSet::new();
    for assignment in owned_assignments(identity, assignments) {
        match assignment.scope {
            AssignmentScope::Global => return ResourceAccess::All,
            AssignmentScope::ResourceSpecific => {
                resource_ids.extend(assignment.resource_ids.iter().cloned());
            }
        }
    }

    if resource_ids.is_empty() {
        ResourceAccess::Denied
    } else {
        ResourceAccess::Only(resource_ids)
    }
}

/// Returns role ids referenced by assignments without a matching definition.
#[must_use]
pub fn dangling_role_ids(
    assignments: &[RoleAssignment],
    roles: &[RoleDefinition],
) -> BTreeSet<String> {
    assignments
        .iter()
        .filter(|assignment| !roles.iter().any(|role| role.role_id == assignment.role_id))
        .map(|assignment| assignment.role_id.clone())
        .collect()
}

fn owned_assignments<'a>(
    identity: &'a Identity,
    assignments: &'a [RoleAssignment],
) -> impl Iterator<Item = &'a RoleAssignment> {
    assignments
        .iter()
        .filter(move |assignment| assignment.belongs_to(identity))
}
