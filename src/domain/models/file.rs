use serde::{Deserialize, Serialize};

/// Bytes received from a client, on their way to a storage provider.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// What a provider reports back after storing an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    pub url: String,
    pub public_id: String,
    pub size: u64,
    pub mime_type: String,
    pub provider: String,
}
