use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use upload_service::{
    adapters::{repositories::PgUploadedFileRepository, state::AppState},
    application::repositories::uploaded_file_repository::UploadedFileRepository,
    build_router,
    config::AppConfig,
    services,
};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,upload_service=debug")),
        )
        .init();

    let config = AppConfig::from_env().expect("ERROR: invalid configuration");

    tracing::info!(
        "Starting upload-service with provider {} (max upload {} bytes)",
        config.provider,
        config.upload_policy.max_size
    );

    let cors = match config.cors_allowed_origins {
        Some(ref allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("ERROR: Failed to apply database migrations");
    tracing::info!("Database ready");

    let storage_service = services::create_storage_service(&config.provider, &config.secrets)
        .expect("Failed to create storage service");

    if config.admin.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; the admin UI will reject every request");
    }

    let app_state = AppState {
        upload_policy: Arc::new(config.upload_policy.clone()),
        file_repository: Arc::new(PgUploadedFileRepository::new(pool))
            as Arc<dyn UploadedFileRepository>,
        storage_service,
        admin_credentials: config.admin.clone().map(Arc::new),
    };

    let router = build_router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}
