//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod identity_ports;
mod security_admin_ports;
mod security_admin_service;

#[cfg(test)]
mod test_fakes;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{AccessContext, AuthorizationService};
pub use identity_ports::IdentityProvider;
pub use security_admin_ports::{AssignRoleInput, CreateRoleInput, RoleRepository, UpdateRoleInput};
pub use security_admin_service::SecurityAdminService;
