use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StoredObject},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores the bytes and returns where the provider put them.
    async fn upload(&self, file_data: FileData) -> Result<StoredObject, ApplicationError>;

    fn provider_name(&self) -> &'static str;
}
