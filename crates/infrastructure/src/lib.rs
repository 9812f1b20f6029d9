//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod audit_repositories;
mod in_memory_role_repository;
mod platform_client;
mod static_identity_provider;

pub use audit_repositories::{InMemoryAuditRepository, TracingAuditRepository};
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use platform_client::{PlatformClient, PlatformClientConfig};
pub use static_identity_provider::StaticIdentityProvider;
