use tracing::info;
use ventureos_application::{AssignRoleInput, CreateRoleInput, RoleRepository};
use ventureos_core::{AppResult, Identity, PlatformRole};
use ventureos_domain::{AssignmentScope, PermissionCategory, RolePermissions};
use ventureos_infrastructure::StaticIdentityProvider;

pub const DEV_ADMIN_TOKEN: &str = "dev-admin";
pub const DEV_PARTNER_TOKEN: &str = "dev-partner";
pub const DEV_ANALYST_TOKEN: &str = "dev-analyst";

const DEV_ADMIN_EMAIL: &str = "admin@studio.local";
const DEV_PARTNER_EMAIL: &str = "partner@studio.local";
const DEV_ANALYST_EMAIL: &str = "analyst@studio.local";
pub const DEV_SEED_VENTURE_ID: &str = "venture-aurora";

fn partner_permissions() -> RolePermissions {
    let mut permissions = RolePermissions::new();
    for category in [
        PermissionCategory::Ventures,
        PermissionCategory::Tasks,
        PermissionCategory::Documents,
        PermissionCategory::Collaboration,
    ] {
        for permission in category.permissions() {
            permissions.set(category.as_str(), permission, *permission != "delete");
        }
    }

    permissions.with_grant(PermissionCategory::Analytics.as_str(), "view")
}

fn analyst_permissions() -> RolePermissions {
    RolePermissions::new()
        .with_grant(PermissionCategory::Ventures.as_str(), "view")
        .with_grant(PermissionCategory::Documents.as_str(), "view")
        .with_grant(PermissionCategory::Analytics.as_str(), "view")
        .with_grant(PermissionCategory::Analytics.as_str(), "export")
}

/// Seeds demo roles and returns the matching development token table.
pub async fn run(repository: &dyn RoleRepository) -> AppResult<StaticIdentityProvider> {
    let partner_role = repository
        .create_role(CreateRoleInput {
            name: "Venture Partner".to_owned(),
            description: Some("Runs ventures day to day".to_owned()),
            permissions: partner_permissions(),
        })
        .await?;
    let analyst_role = repository
        .create_role(CreateRoleInput {
            name: "Analyst".to_owned(),
            description: Some("Reads and exports venture metrics".to_owned()),
            permissions: analyst_permissions(),
        })
        .await?;

    repository
        .create_assignment(AssignRoleInput {
            user_email: DEV_PARTNER_EMAIL.to_owned(),
            role_id: partner_role.role_id,
            scope: AssignmentScope::Global,
            resource_ids: Vec::new(),
        })
        .await?;
    repository
        .create_assignment(AssignRoleInput {
            user_email: DEV_ANALYST_EMAIL.to_owned(),
            role_id: analyst_role.role_id,
            scope: AssignmentScope::ResourceSpecific,
            resource_ids: vec![DEV_SEED_VENTURE_ID.to_owned()],
        })
        .await?;

    info!(
        admin_token = DEV_ADMIN_TOKEN,
        partner_token = DEV_PARTNER_TOKEN,
        analyst_token = DEV_ANALYST_TOKEN,
        "seeded development roles"
    );

    Ok(StaticIdentityProvider::new()
        .with_identity(
            DEV_ADMIN_TOKEN,
            Identity::new(
                DEV_ADMIN_EMAIL,
                Some("Studio Admin".to_owned()),
                PlatformRole::Admin,
            ),
        )
        .with_identity(
            DEV_PARTNER_TOKEN,
            Identity::new(
                DEV_PARTNER_EMAIL,
                Some("Venture Partner".to_owned()),
                PlatformRole::User,
            ),
        )
        .with_identity(
            DEV_ANALYST_TOKEN,
            Identity::new(
                DEV_ANALYST_EMAIL,
                Some("Analyst".to_owned()),
                PlatformRole::User,
            ),
        ))
}
