use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use ventureos_core::Identity;

use crate::dto::{
    IdentityResponse, PermissionCheckQuery, PermissionCheckResponse, PermissionSummaryResponse,
    ResourceAccessCheckResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn me_handler(Extension(user): Extension<Identity>) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&user))
}

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
) -> ApiResult<Json<PermissionSummaryResponse>> {
    let context = state
        .authorization_service
        .load_access_context(&user)
        .await?;

    Ok(Json(PermissionSummaryResponse::from(&context)))
}

/// Unknown categories and permissions answer `false` rather than an error.
pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Query(query): Query<PermissionCheckQuery>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let allowed = state
        .authorization_service
        .has_permission(&user, query.category.as_str(), query.permission.as_str())
        .await?;

    Ok(Json(PermissionCheckResponse {
        category: query.category,
        permission: query.permission,
        allowed,
    }))
}

pub async fn resource_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Path(resource_id): Path<String>,
) -> ApiResult<Json<ResourceAccessCheckResponse>> {
    let allowed = state
        .authorization_service
        .can_access_resource(&user, resource_id.as_str())
        .await?;

    Ok(Json(ResourceAccessCheckResponse {
        resource_id,
        allowed,
    }))
}
