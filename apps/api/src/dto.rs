use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;
use ventureos_core::Identity;

mod permissions;
mod security;

pub use permissions::{
    PermissionCheckQuery, PermissionCheckResponse, PermissionSummaryResponse,
    ResourceAccessCheckResponse, ResourceAccessResponse,
};
pub use security::{
    AssignRoleRequest, CreateRoleRequest, RoleAssignmentResponse, RoleResponse, UpdateRoleRequest,
};

/// Category -> permission -> granted, as sent over the wire.
pub type GrantTable = BTreeMap<String, BTreeMap<String, bool>>;

fn grant_table<'a>(grants: impl Iterator<Item = (&'a str, &'a str)>) -> GrantTable {
    let mut table = GrantTable::new();
    for (category, permission) in grants {
        table
            .entry(category.to_owned())
            .or_default()
            .insert(permission.to_owned(), true);
    }

    table
}

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/identity-response.ts"
)]
pub struct IdentityResponse {
    pub email: String,
    pub display_name: Option<String>,
    pub platform_role: String,
    pub is_privileged: bool,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            email: identity.email().to_owned(),
            display_name: identity.display_name().map(str::to_owned),
            platform_role: identity.platform_role().as_str().to_owned(),
            is_privileged: identity.is_privileged(),
        }
    }
}
