use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::{
        repositories::uploaded_file_repository::UploadedFileRepository,
        services::StorageService,
    },
    config::AdminCredentials,
    domain::config::upload::UploadPolicy,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub upload_policy: Arc<UploadPolicy>,
    pub file_repository: Arc<dyn UploadedFileRepository>,
    pub storage_service: Arc<dyn StorageService>,
    pub admin_credentials: Option<Arc<AdminCredentials>>,
}
