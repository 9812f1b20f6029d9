use serde::{Deserialize, Serialize};
use ts_rs::TS;
use ventureos_application::AccessContext;
use ventureos_domain::ResourceAccess;

use super::{GrantTable, IdentityResponse, grant_table};

/// Resources the caller may open.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/resource-access-response.ts"
)]
pub struct ResourceAccessResponse {
    /// One of `all`, `only` or `denied`.
    pub kind: String,
    pub resource_ids: Vec<String>,
}

impl From<ResourceAccess> for ResourceAccessResponse {
    fn from(access: ResourceAccess) -> Self {
        match access {
            ResourceAccess::All => Self {
                kind: "all".to_owned(),
                resource_ids: Vec::new(),
            },
            ResourceAccess::Only(resource_ids) => Self {
                kind: "only".to_owned(),
                resource_ids: resource_ids.into_iter().collect(),
            },
            ResourceAccess::Denied => Self {
                kind: "denied".to_owned(),
                resource_ids: Vec::new(),
            },
        }
    }
}

/// Resolved capabilities for the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-summary-response.ts"
)]
pub struct PermissionSummaryResponse {
    pub identity: IdentityResponse,
    pub is_privileged: bool,
    /// `null` when no role data applies to the caller.
    pub capabilities: Option<GrantTable>,
    pub resources: ResourceAccessResponse,
    pub loaded_at: String,
}

impl From<&AccessContext> for PermissionSummaryResponse {
    fn from(context: &AccessContext) -> Self {
        Self {
            identity: IdentityResponse::from(context.identity()),
            is_privileged: context.is_privileged(),
            capabilities: context
                .capabilities()
                .map(|capabilities| grant_table(capabilities.granted())),
            resources: ResourceAccessResponse::from(context.accessible_resources()),
            loaded_at: context.loaded_at().to_rfc3339(),
        }
    }
}

/// Query string for a single permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-check-query.ts"
)]
pub struct PermissionCheckQuery {
    pub category: String,
    pub permission: String,
}

/// Result of a single permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub category: String,
    pub permission: String,
    pub allowed: bool,
}

/// Result of a resource access check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/resource-access-check-response.ts"
)]
pub struct ResourceAccessCheckResponse {
    pub resource_id: String,
    pub allowed: bool,
}
