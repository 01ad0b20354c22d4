mod cloudinary_storage;
mod error;
mod supabase_storage;

pub use cloudinary_storage::{CloudinaryStorageService, CLOUDINARY_API_BASE};
pub use error::StorageError;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::{local::Provider, secrets::Secrets},
};

pub fn create_storage_service(
    provider: &Provider,
    secrets: &Secrets,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match provider {
        Provider::Cloudinary => {
            let cloudinary_secrets = secrets.cloudinary_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Cloudinary secrets not found".to_string())
            })?;

            let service = CloudinaryStorageService::new(cloudinary_secrets.clone())?;
            Ok(Arc::new(service))
        }
        Provider::Supabase => {
            let supabase_secrets = secrets.supabase_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Supabase secrets not found".to_string())
            })?;

            let service = SupabaseStorageService::new(supabase_secrets.clone());
            Ok(Arc::new(service))
        }
    }
}

/// Keeps ASCII alphanumerics, dots and dashes so provider paths stay URL-safe.
pub(crate) fn safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
