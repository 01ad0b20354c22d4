use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{FileDetailResponse, FileListResponse, UploadFileResponse},
        state::AppState,
    },
    application::{
        dto::uploaded_file_dto::{FileQuery, NewUploadedFile},
        error::ApplicationError,
        validation::{validate_upload, IncomingFile, FILE_FIELD},
    },
    domain::config::upload::UploadPolicy,
};

const INVALID_MULTIPART: &str = "Invalid multipart request.";

pub struct FileController;

impl FileController {
    /// Reads the first `file` part; every other part is ignored.
    async fn read_file_field(
        multipart: Result<Multipart, MultipartRejection>,
        policy: &UploadPolicy,
    ) -> Result<Option<IncomingFile>, ApplicationError> {
        let mut multipart = multipart.map_err(|e| {
            warn!("Rejected upload body: {}", e);
            ApplicationError::field(FILE_FIELD, INVALID_MULTIPART)
        })?;

        let too_large = || {
            ApplicationError::field(
                FILE_FIELD,
                format!("File size cannot exceed {}MB", policy.max_size_mb_label()),
            )
        };

        let mut upload: Option<IncomingFile> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
                Err(e) => {
                    warn!("Invalid multipart data: {}", e);
                    return Err(ApplicationError::field(FILE_FIELD, INVALID_MULTIPART));
                }
            };

            if field.name() != Some(FILE_FIELD) || upload.is_some() {
                continue;
            }

            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let content = match field.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
                Err(e) => {
                    warn!("Cannot read file bytes: {}", e);
                    return Err(ApplicationError::field(FILE_FIELD, INVALID_MULTIPART));
                }
            };

            upload = Some(IncomingFile {
                filename,
                content_type,
                content,
            });
        }

        Ok(upload)
    }

    /// POST /api/upload/file-uploads/
    pub async fn upload_file(
        State(app_state): State<AppState>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<(StatusCode, Json<UploadFileResponse>), ApplicationError> {
        let policy = app_state.upload_policy.as_ref();
        let upload = Self::read_file_field(multipart, policy).await?;

        let file_data = validate_upload(upload, policy).map_err(ApplicationError::Validation)?;
        let original_name = file_data.filename.clone();
        let content_type = file_data.mime_type.clone();
        let file_size = file_data.size();

        let stored = app_state.storage_service.upload(file_data).await?;
        info!(
            "Stored {} ({} bytes) at {} as {}",
            original_name, file_size, stored.provider, stored.public_id
        );

        let record = app_state
            .file_repository
            .create(NewUploadedFile {
                original_name,
                storage_url: stored.url,
                file_size: Some(file_size),
                content_type: Some(content_type),
            })
            .await?;

        info!("Created uploaded file record {}", record.id);

        Ok((StatusCode::CREATED, Json(UploadFileResponse::from(record))))
    }

    /// GET /api/upload/file-uploads/
    pub async fn list_files(
        State(app_state): State<AppState>,
        Query(query): Query<FileQuery>,
    ) -> Result<Json<FileListResponse>, ApplicationError> {
        let files = app_state.file_repository.list(&query).await?;
        Ok(Json(FileListResponse::from(files)))
    }

    /// GET /api/upload/file-uploads/{id}/
    pub async fn get_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<FileDetailResponse>, ApplicationError> {
        let id = parse_id(&id)?;
        let file = app_state.file_repository.get(id).await?;
        Ok(Json(FileDetailResponse::from(file)))
    }

    /// DELETE /api/upload/file-uploads/{id}/
    ///
    /// Only the local record goes away; the object stays at the provider.
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        let id = parse_id(&id)?;
        let deleted = app_state.file_repository.delete(id).await?;
        info!(
            "Deleted uploaded file record {} ({}); stored object left in place",
            deleted.id, deleted.storage_url
        );
        Ok(StatusCode::NO_CONTENT)
    }
}

/// Ids that are not integers cannot exist, so they read as not found.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApplicationError> {
    raw.trim().parse::<i64>().map_err(|_| ApplicationError::NotFound)
}
