pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use adapters::{
    controllers::{
        admin_controller::AdminController, file_controller::FileController,
        health_controller::HealthController,
    },
    middleware::require_admin,
    state::AppState,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn build_router(app_state: AppState) -> Router {
    let body_limit = usize::try_from(app_state.upload_policy.max_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let collection = || -> MethodRouter<AppState> {
        get(FileController::list_files)
            .post(FileController::upload_file)
            .layer(DefaultBodyLimit::max(body_limit))
    };
    let item = || -> MethodRouter<AppState> {
        get(FileController::get_file).delete(FileController::delete_file)
    };

    let api_routes = Router::new()
        .route("/api/upload/file-uploads", collection())
        .route("/api/upload/file-uploads/", collection())
        .route("/api/upload/file-uploads/{id}", item())
        .route("/api/upload/file-uploads/{id}/", item());

    let admin_routes = Router::new()
        .route("/admin", get(AdminController::index))
        .route("/admin/", get(AdminController::index))
        .route("/admin/files", get(AdminController::list_files))
        .route("/admin/files/", get(AdminController::list_files))
        .route("/admin/files/delete/", post(AdminController::bulk_delete))
        .route("/admin/files/{id}/", get(AdminController::file_detail))
        .route("/admin/files/{id}/delete/", post(AdminController::delete_file))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/health", get(HealthController::health_check))
        .merge(api_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
