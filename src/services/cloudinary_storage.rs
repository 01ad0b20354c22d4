use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::secrets::CloudinarySecrets,
        models::file::{FileData, StoredObject},
    },
    services::error::StorageError,
};

pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

// "auto" lets Cloudinary accept documents as well as images.
const RESOURCE_TYPE: &str = "auto";

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    bytes: Option<u64>,
    error: Option<CloudinaryErrorBody>,
}

pub struct CloudinaryStorageService {
    client: Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
    upload_preset: Option<String>,
    folder: Option<String>,
}

impl CloudinaryStorageService {
    pub fn new(secrets: CloudinarySecrets) -> Result<Self, StorageError> {
        if secrets.cloud_name.trim().is_empty() {
            return Err(StorageError::InvalidCredentials(
                "Cloudinary cloud name is empty".to_string(),
            ));
        }
        if secrets.upload_preset.is_none()
            && (secrets.api_key.is_empty() || secrets.api_secret.is_empty())
        {
            return Err(StorageError::InvalidCredentials(
                "Signed Cloudinary uploads need an API key and secret".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            upload_url: format!(
                "{}/v1_1/{}/{}/upload",
                secrets.api_base.trim_end_matches('/'),
                secrets.cloud_name,
                RESOURCE_TYPE
            ),
            api_key: secrets.api_key,
            api_secret: secrets.api_secret,
            upload_preset: secrets.upload_preset,
            folder: secrets.folder,
        })
    }

    /// Sorted `key=value` pairs joined by `&`, the form Cloudinary signs.
    fn string_to_sign(params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(Self::string_to_sign(params).as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn build_form(&self, file_data: &FileData) -> Result<multipart::Form, StorageError> {
        let file_part = multipart::Part::bytes(file_data.content.clone())
            .file_name(file_data.filename.clone())
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let mut form = multipart::Form::new().part("file", file_part);

        if let Some(ref folder) = self.folder {
            form = form.text("folder", folder.clone());
        }

        if let Some(ref preset) = self.upload_preset {
            return Ok(form.text("upload_preset", preset.clone()));
        }

        let timestamp = Utc::now().timestamp().to_string();
        let mut signed = vec![("timestamp", timestamp.clone())];
        if let Some(ref folder) = self.folder {
            signed.push(("folder", folder.clone()));
        }

        Ok(form
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", self.sign(&signed))
            .text("signature_algorithm", "sha256"))
    }

    fn into_stored_object(
        body: CloudinaryUploadResponse,
        file_data: &FileData,
    ) -> Result<StoredObject, StorageError> {
        if let Some(error) = body.error {
            return Err(StorageError::ProviderError(error.message));
        }

        let url = body
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| StorageError::ProviderError("No secure URL returned".to_string()))?;

        Ok(StoredObject {
            url,
            public_id: body.public_id.unwrap_or_default(),
            size: body.bytes.unwrap_or_else(|| file_data.size()),
            mime_type: file_data.mime_type.clone(),
            provider: "cloudinary".to_string(),
        })
    }
}

#[async_trait]
impl StorageService for CloudinaryStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        let form = self.build_form(&file_data)?;
        debug!(
            "Uploading {} ({} bytes) to Cloudinary",
            file_data.filename,
            file_data.size()
        );

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        let body: CloudinaryUploadResponse = serde_json::from_str(&body_text).map_err(|e| {
            warn!("Unreadable Cloudinary response ({}): {}", status, body_text);
            StorageError::ProviderError(format!("Invalid response: {}", e))
        })?;

        if status.as_u16() == 401 || status.as_u16() == 403 {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(StorageError::Unauthorized(message).into());
        }

        if !status.is_success() && body.error.is_none() {
            return Err(StorageError::ProviderError(format!(
                "Upload failed with status: {}",
                status
            ))
            .into());
        }

        Ok(Self::into_stored_object(body, &file_data)?)
    }

    fn provider_name(&self) -> &'static str {
        "cloudinary"
    }
}
