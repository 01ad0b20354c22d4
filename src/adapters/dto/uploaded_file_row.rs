use sqlx::{postgres::PgRow, FromRow, Row};

use crate::domain::models::uploaded_file::UploadedFile;

impl FromRow<'_, PgRow> for UploadedFile {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let file_size: Option<i64> = row.try_get("file_size")?;

        Ok(UploadedFile {
            id: row.try_get("id")?,
            original_name: row.try_get("original_name")?,
            storage_url: row.try_get("storage_url")?,
            file_size: file_size.map(|size| size.max(0) as u64),
            content_type: row.try_get("content_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
