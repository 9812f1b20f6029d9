use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use ventureos_application::{AssignRoleInput, CreateRoleInput, UpdateRoleInput};
use ventureos_core::Identity;

use crate::dto::{
    AssignRoleRequest, CreateRoleRequest, RoleAssignmentResponse, RoleResponse, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod roles;

pub use roles::{create_role_handler, delete_role_handler, list_roles_handler, update_role_handler};

pub async fn list_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let assignments = state
        .security_admin_service
        .list_role_assignments(&user)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleAssignmentResponse>)> {
    let assignment = state
        .security_admin_service
        .assign_role(&user, AssignRoleInput::try_from(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleAssignmentResponse::from(assignment)),
    ))
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .unassign_role(&user, assignment_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
