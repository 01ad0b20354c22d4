//! Shared fixtures: in-memory repository, a scripted storage provider and a
//! router wired to both.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use upload_service::{
    adapters::state::AppState,
    application::{
        dto::uploaded_file_dto::{FileQuery, NewUploadedFile},
        error::ApplicationError,
        repositories::uploaded_file_repository::UploadedFileRepository,
        services::StorageService,
    },
    build_router,
    config::AdminCredentials,
    domain::{
        config::upload::UploadPolicy,
        models::{
            file::{FileData, StoredObject},
            uploaded_file::UploadedFile,
        },
    },
};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

#[derive(Default)]
pub struct InMemoryFileRepository {
    rows: Mutex<Vec<UploadedFile>>,
}

impl InMemoryFileRepository {
    pub fn rows(&self) -> Vec<UploadedFile> {
        self.rows.lock().unwrap().clone()
    }

    /// Inserts a row directly, `age_minutes` in the past.
    pub fn seed(&self, name: &str, content_type: &str, size: u64, age_minutes: i64) -> i64 {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let created = Utc::now() - Duration::minutes(age_minutes);
        rows.push(UploadedFile {
            id,
            original_name: name.to_string(),
            storage_url: format!("https://res.cloudinary.com/demo/image/upload/v1/{}", name),
            file_size: Some(size),
            content_type: Some(content_type.to_string()),
            created_at: created,
            updated_at: created,
        });
        id
    }

    fn matching(&self, query: &FileQuery) -> Vec<UploadedFile> {
        let search = query.search_term().map(str::to_lowercase);
        let mut rows: Vec<UploadedFile> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| {
                let content_type = row.content_type.clone().unwrap_or_default();
                let matches_search = search.as_ref().map_or(true, |term| {
                    row.original_name.to_lowercase().contains(term)
                        || content_type.to_lowercase().contains(term)
                });
                let matches_type = query
                    .content_type_filter()
                    .map_or(true, |ct| ct == content_type);
                matches_search && matches_type
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

#[async_trait]
impl UploadedFileRepository for InMemoryFileRepository {
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, ApplicationError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let row = UploadedFile {
            id,
            original_name: file.original_name,
            storage_url: file.storage_url,
            file_size: file.file_size,
            content_type: file.content_type,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, query: &FileQuery) -> Result<Vec<UploadedFile>, ApplicationError> {
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self.matching(query).into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: &FileQuery) -> Result<u64, ApplicationError> {
        Ok(self.matching(query).len() as u64)
    }

    async fn get(&self, id: i64) -> Result<UploadedFile, ApplicationError> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<UploadedFile, ApplicationError> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(ApplicationError::NotFound)?;
        Ok(rows.remove(index))
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, ApplicationError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| !ids.contains(&row.id));
        Ok((before - rows.len()) as u64)
    }

    async fn content_types(&self) -> Result<Vec<String>, ApplicationError> {
        let mut types: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter_map(|row| row.content_type.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}

/// Provider double that keeps every object it was handed.
#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<Vec<FileData>>,
    fail: AtomicBool,
}

impl FakeStorage {
    pub fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn objects(&self) -> Vec<FileData> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageService for FakeStorage {
    async fn upload(&self, file_data: FileData) -> Result<StoredObject, ApplicationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::StorageError(
                "Storage provider error: Invalid Signature".to_string(),
            ));
        }

        let mut objects = self.objects.lock().unwrap();
        let public_id = format!("obj{}", objects.len() + 1);
        let stored = StoredObject {
            url: format!(
                "https://res.cloudinary.com/demo/image/upload/v1750978613/{}",
                public_id
            ),
            public_id,
            size: file_data.size(),
            mime_type: file_data.mime_type.clone(),
            provider: "fake".to_string(),
        };
        objects.push(file_data);
        Ok(stored)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryFileRepository>,
    pub storage: Arc<FakeStorage>,
}

pub fn test_app_with_policy(policy: UploadPolicy) -> TestApp {
    let repository = Arc::new(InMemoryFileRepository::default());
    let storage = Arc::new(FakeStorage::default());

    let state = AppState {
        upload_policy: Arc::new(policy),
        file_repository: repository.clone(),
        storage_service: storage.clone(),
        admin_credentials: Some(Arc::new(AdminCredentials {
            username: ADMIN_USER.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })),
    };

    let server = TestServer::new(build_router(state)).expect("Failed to create test server");

    TestApp {
        server,
        repository,
        storage,
    }
}

pub fn test_app() -> TestApp {
    test_app_with_policy(UploadPolicy::default())
}
