use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{application::error::FieldErrors, domain::models::uploaded_file::UploadedFile};

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    pub original_name: String,
    pub url: String,
    pub file_size: Option<u64>,
    pub file_size_mb: Option<f64>,
    pub content_type: Option<String>,
    pub upload_date: DateTime<Utc>,
}

impl From<UploadedFile> for FileResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            id: file.id,
            file_size_mb: file.file_size_mb(),
            original_name: file.original_name,
            url: file.storage_url,
            file_size: file.file_size,
            content_type: file.content_type,
            upload_date: file.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub success: bool,
    pub message: String,
    pub data: FileResponse,
}

impl From<UploadedFile> for UploadFileResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully".to_string(),
            data: file.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<FileResponse>,
}

impl From<Vec<UploadedFile>> for FileListResponse {
    fn from(files: Vec<UploadedFile>) -> Self {
        Self {
            success: true,
            count: files.len(),
            data: files.into_iter().map(FileResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileDetailResponse {
    pub success: bool,
    pub data: FileResponse,
}

impl From<UploadedFile> for FileDetailResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            success: true,
            data: file.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
        }
    }
}
