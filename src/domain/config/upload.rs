use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Limits every upload is checked against before it reaches a provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadPolicy {
    #[serde(rename = "maxSize")]
    pub max_size: u64,
    #[serde(rename = "allowedMimeTypes")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    pub fn allows(&self, content_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == content_type)
    }

    /// Limit in whole megabytes for error messages, e.g. `10` for 10 MiB.
    pub fn max_size_mb_label(&self) -> String {
        let mb = self.max_size as f64 / (1024.0 * 1024.0);
        if mb.fract() == 0.0 {
            format!("{}", mb as u64)
        } else {
            format!("{:.2}", mb)
        }
    }
}
