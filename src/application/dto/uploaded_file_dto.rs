use serde::Deserialize;

/// Row to insert after a provider accepted the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUploadedFile {
    pub original_name: String,
    pub storage_url: String,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
}

impl NewUploadedFile {
    pub fn sanitize(&mut self) {
        if let Some(size) = self.file_size {
            self.file_size = Some(std::cmp::min(size, i64::MAX as u64));
        }
        if let Some(ref content_type) = self.content_type {
            if content_type.trim().is_empty() {
                self.content_type = None;
            }
        }
    }
}

/// Filters shared by the JSON list endpoint and the admin pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl FileQuery {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn content_type_filter(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
