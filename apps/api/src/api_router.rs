use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, put};
use tower_http::trace::TraceLayer;
use ventureos_core::AppError;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::permissions::me_handler))
        .route(
            "/api/me/permissions",
            get(handlers::permissions::my_permissions_handler),
        )
        .route(
            "/api/permissions/check",
            get(handlers::permissions::check_permission_handler),
        )
        .route(
            "/api/resources/{resource_id}/access",
            get(handlers::permissions::resource_access_handler),
        )
        .route(
            "/api/security/roles",
            get(handlers::security::list_roles_handler)
                .post(handlers::security::create_role_handler),
        )
        .route(
            "/api/security/roles/{role_id}",
            put(handlers::security::update_role_handler)
                .delete(handlers::security::delete_role_handler),
        )
        .route(
            "/api/security/role-assignments",
            get(handlers::security::list_role_assignments_handler)
                .post(handlers::security::assign_role_handler),
        )
        .route(
            "/api/security/role-assignments/{assignment_id}",
            delete(handlers::security::unassign_role_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
