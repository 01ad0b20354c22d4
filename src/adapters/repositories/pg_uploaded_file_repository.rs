use async_trait::async_trait;
use sqlx::{query_as, query_scalar, Postgres, QueryBuilder};
use tracing::debug;

use crate::{
    application::{
        dto::uploaded_file_dto::{FileQuery, NewUploadedFile},
        error::ApplicationError,
        repositories::uploaded_file_repository::UploadedFileRepository,
    },
    domain::models::uploaded_file::UploadedFile,
};

pub struct PgUploadedFileRepository {
    pool: sqlx::PgPool,
}

impl PgUploadedFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &FileQuery) {
    builder.push(" WHERE TRUE");

    if let Some(term) = query.search_term() {
        let pattern = like_pattern(term);
        builder.push(" AND (original_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR content_type ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(content_type) = query.content_type_filter() {
        builder.push(" AND content_type = ");
        builder.push_bind(content_type.to_string());
    }
}

#[async_trait]
impl UploadedFileRepository for PgUploadedFileRepository {
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = r#"
            INSERT INTO uploaded_files (original_name, storage_url, file_size, content_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        "#;

        let created = query_as::<_, UploadedFile>(query)
            .bind(&file.original_name)
            .bind(&file.storage_url)
            .bind(file.file_size.map(|size| size as i64))
            .bind(&file.content_type)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        debug!("Inserted uploaded file {}", created.id);
        Ok(created)
    }

    async fn list(&self, query: &FileQuery) -> Result<Vec<UploadedFile>, ApplicationError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM uploaded_files");
        push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ");
            builder.push_bind(i64::from(offset));
        }

        let rows = builder
            .build_query_as::<UploadedFile>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn count(&self, query: &FileQuery) -> Result<u64, ApplicationError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM uploaded_files");
        push_filters(&mut builder, query);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(total.max(0) as u64)
    }

    async fn get(&self, id: i64) -> Result<UploadedFile, ApplicationError> {
        let query = "SELECT * FROM uploaded_files WHERE id = $1";

        query_as::<_, UploadedFile>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<UploadedFile, ApplicationError> {
        let query = "DELETE FROM uploaded_files WHERE id = $1 RETURNING *";

        query_as::<_, UploadedFile>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, ApplicationError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM uploaded_files WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn content_types(&self) -> Result<Vec<String>, ApplicationError> {
        let query = r#"
            SELECT DISTINCT content_type FROM uploaded_files
            WHERE content_type IS NOT NULL
            ORDER BY content_type
        "#;

        query_scalar::<_, String>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))
    }
}
