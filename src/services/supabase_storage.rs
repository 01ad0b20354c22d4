use async_trait::async_trait;
use reqwest::{multipart, Client};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::secrets::SupabaseSecrets,
        models::file::{FileData, StoredObject},
    },
    services::{error::StorageError, safe_filename},
};

pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageService {
    pub fn new(secrets: SupabaseSecrets) -> Self {
        Self {
            client: Client::new(),
            storage_url: secrets.storage_url.trim_end_matches('/').to_string(),
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
        }
    }

    fn generate_file_path(filename: &str) -> String {
        format!("{}/{}", Uuid::new_v4(), safe_filename(filename))
    }

    fn public_url(&self, file_path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url, self.bucket_name, file_path
        )
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        let file_path = Self::generate_file_path(&file_data.filename);
        let size = file_data.size();

        let file_part = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename.clone())
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let url = format!(
            "{}/object/{}/{}",
            self.storage_url, self.bucket_name, file_path
        );
        debug!("Uploading {} bytes to Supabase at {}", size, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StorageError::Unauthorized(format!("Upload rejected: {}", status)).into());
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Supabase upload failed with {}: {}", status, error_text);
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        Ok(StoredObject {
            url: self.public_url(&file_path),
            public_id: file_path,
            size,
            mime_type: file_data.mime_type,
            provider: self.provider_name().to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "supabase"
    }
}
