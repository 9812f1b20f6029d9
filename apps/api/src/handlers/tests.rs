use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use ventureos_core::{AppError, Identity, PlatformRole};
use ventureos_infrastructure::{InMemoryAuditRepository, InMemoryRoleRepository};

use crate::api_services::assemble_app_state;
use crate::dev_seed::{self, DEV_SEED_VENTURE_ID};
use crate::dto::{AssignRoleRequest, CreateRoleRequest, PermissionCheckQuery};
use crate::error::ApiError;
use crate::state::AppState;

use super::{permissions, security};

async fn seeded_state() -> AppState {
    let repository = Arc::new(InMemoryRoleRepository::new());
    let identity_provider = dev_seed::run(repository.as_ref())
        .await
        .unwrap_or_else(|_| unreachable!());

    assemble_app_state(
        repository,
        Arc::new(identity_provider),
        Arc::new(InMemoryAuditRepository::new()),
    )
}

fn admin() -> Identity {
    Identity::new("admin@studio.local", None, PlatformRole::Admin)
}

fn partner() -> Identity {
    Identity::new("partner@studio.local", None, PlatformRole::User)
}

fn analyst() -> Identity {
    Identity::new("analyst@studio.local", None, PlatformRole::User)
}

fn stranger() -> Identity {
    Identity::new("stranger@studio.local", None, PlatformRole::User)
}

fn check(category: &str, permission: &str) -> Query<PermissionCheckQuery> {
    Query(PermissionCheckQuery {
        category: category.to_owned(),
        permission: permission.to_owned(),
    })
}

async fn allowed(state: &AppState, user: Identity, category: &str, permission: &str) -> bool {
    let Ok(Json(response)) = permissions::check_permission_handler(
        State(state.clone()),
        Extension(user),
        check(category, permission),
    )
    .await
    else {
        panic!("permission check failed");
    };

    response.allowed
}

#[tokio::test]
async fn admin_summary_is_full_and_global() {
    let state = seeded_state().await;

    let Ok(Json(summary)) =
        permissions::my_permissions_handler(State(state), Extension(admin())).await
    else {
        panic!("summary failed");
    };

    assert!(summary.is_privileged);
    assert_eq!(summary.resources.kind, "all");
    let capabilities = summary.capabilities.unwrap_or_default();
    assert_eq!(
        capabilities
            .get("admin")
            .and_then(|permissions| permissions.get("manage_roles")),
        Some(&true)
    );
}

#[tokio::test]
async fn stranger_has_no_capabilities() {
    let state = seeded_state().await;

    let Ok(Json(summary)) =
        permissions::my_permissions_handler(State(state.clone()), Extension(stranger())).await
    else {
        panic!("summary failed");
    };

    assert!(summary.capabilities.is_none());
    assert_eq!(summary.resources.kind, "denied");
    assert!(!allowed(&state, stranger(), "ventures", "view").await);
}

#[tokio::test]
async fn permission_checks_follow_seeded_roles() {
    let state = seeded_state().await;

    assert!(allowed(&state, partner(), "ventures", "edit").await);
    assert!(!allowed(&state, partner(), "ventures", "delete").await);
    assert!(allowed(&state, analyst(), "analytics", "export").await);
    assert!(!allowed(&state, analyst(), "tasks", "view").await);
    assert!(!allowed(&state, analyst(), "unknown", "view").await);
    assert!(allowed(&state, admin(), "unknown", "view").await);
}

#[tokio::test]
async fn resource_access_respects_assignment_scope() {
    let state = seeded_state().await;

    for (user, resource_id, expected) in [
        (analyst(), DEV_SEED_VENTURE_ID, true),
        (analyst(), "venture-borealis", false),
        (partner(), "venture-borealis", true),
        (stranger(), DEV_SEED_VENTURE_ID, false),
    ] {
        let Ok(Json(response)) = permissions::resource_access_handler(
            State(state.clone()),
            Extension(user),
            Path(resource_id.to_owned()),
        )
        .await
        else {
            panic!("resource check failed");
        };
        assert_eq!(response.allowed, expected, "{resource_id}");
    }
}

#[tokio::test]
async fn only_role_managers_may_list_roles() {
    let state = seeded_state().await;

    let Ok(Json(roles)) =
        security::list_roles_handler(State(state.clone()), Extension(admin())).await
    else {
        panic!("listing failed");
    };
    assert_eq!(roles.len(), 2);

    let denied = security::list_roles_handler(State(state), Extension(partner())).await;
    assert!(matches!(denied, Err(ApiError(AppError::Forbidden(_)))));
}

#[tokio::test]
async fn created_role_takes_effect_once_assigned() {
    let state = seeded_state().await;

    let mut tasks = BTreeMap::new();
    tasks.insert("view".to_owned(), true);
    let mut grants = BTreeMap::new();
    grants.insert("tasks".to_owned(), tasks);

    let Ok((status, Json(role))) = security::create_role_handler(
        State(state.clone()),
        Extension(admin()),
        Json(CreateRoleRequest {
            name: "Task Viewer".to_owned(),
            description: None,
            permissions: grants,
        }),
    )
    .await
    else {
        panic!("role creation failed");
    };
    assert_eq!(status, StatusCode::CREATED);
    assert!(!allowed(&state, stranger(), "tasks", "view").await);

    let assigned = security::assign_role_handler(
        State(state.clone()),
        Extension(admin()),
        Json(AssignRoleRequest {
            user_email: "Stranger@Studio.local".to_owned(),
            role_id: role.role_id,
            scope: "global".to_owned(),
            resource_ids: Vec::new(),
        }),
    )
    .await;
    assert!(assigned.is_ok_and(|(status, _)| status == StatusCode::CREATED));

    assert!(allowed(&state, stranger(), "tasks", "view").await);
    assert!(!allowed(&state, stranger(), "tasks", "edit").await);
}

#[tokio::test]
async fn assignment_with_unknown_scope_is_rejected() {
    let state = seeded_state().await;

    let result = security::assign_role_handler(
        State(state),
        Extension(admin()),
        Json(AssignRoleRequest {
            user_email: "stranger@studio.local".to_owned(),
            role_id: "missing".to_owned(),
            scope: "workspace".to_owned(),
            resource_ids: Vec::new(),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
}
