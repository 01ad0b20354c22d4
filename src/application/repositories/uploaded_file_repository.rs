use async_trait::async_trait;

use crate::{
    application::{
        dto::uploaded_file_dto::{FileQuery, NewUploadedFile},
        error::ApplicationError,
    },
    domain::models::uploaded_file::UploadedFile,
};

#[async_trait]
pub trait UploadedFileRepository: Send + Sync {
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, ApplicationError>;
    /// Newest first.
    async fn list(&self, query: &FileQuery) -> Result<Vec<UploadedFile>, ApplicationError>;
    async fn count(&self, query: &FileQuery) -> Result<u64, ApplicationError>;
    async fn get(&self, id: i64) -> Result<UploadedFile, ApplicationError>;
    /// Removes the local row only; the stored object stays at the provider.
    async fn delete(&self, id: i64) -> Result<UploadedFile, ApplicationError>;
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, ApplicationError>;
    async fn content_types(&self) -> Result<Vec<String>, ApplicationError>;
}
