//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod capability;
pub mod permission_resolver;
mod role;
mod security;

pub use capability::{CapabilityMap, ResourceAccess};
pub use role::{AssignmentScope, RoleAssignment, RoleDefinition, RolePermissions};
pub use security::{AuditAction, PermissionCategory, validate_permission_pair};
