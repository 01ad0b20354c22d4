use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

const THUMBNAIL_TRANSFORM: &str = "/upload/w_200,h_200,c_fit,q_auto/";
const ATTACHMENT_TRANSFORM: &str = "/upload/fl_attachment/";

/// Metadata row for one file stored at a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    pub original_name: String,
    pub storage_url: String,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadedFile {
    fn known_size(&self) -> Option<u64> {
        self.file_size.filter(|size| *size > 0)
    }

    /// Size in megabytes rounded to two decimals.
    pub fn file_size_mb(&self) -> Option<f64> {
        self.known_size()
            .map(|size| (size as f64 / MIB as f64 * 100.0).round() / 100.0)
    }

    pub fn file_size_display(&self) -> String {
        match self.known_size() {
            Some(size) if size < KIB => format!("{} bytes", size),
            Some(size) if size < MIB => format!("{:.1} KB", size as f64 / KIB as f64),
            Some(size) => format!("{:.2} MB", size as f64 / MIB as f64),
            None => "Unknown".to_string(),
        }
    }

    pub fn file_size_mb_display(&self) -> String {
        match self.known_size() {
            Some(size) => format!("{:.2} MB", size as f64 / MIB as f64),
            None => "Unknown".to_string(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    /// Link that makes Cloudinary serve the object as an attachment.
    /// URLs from other providers come back unchanged.
    pub fn download_url(&self) -> String {
        self.storage_url.replace("/upload/", ATTACHMENT_TRANSFORM)
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        if self.is_image() && !self.storage_url.is_empty() {
            Some(self.storage_url.replace("/upload/", THUMBNAIL_TRANSFORM))
        } else {
            None
        }
    }
}

impl fmt::Display for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.original_name,
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(size: Option<u64>, content_type: &str) -> UploadedFile {
        let created = Utc.with_ymd_and_hms(2025, 6, 26, 22, 56, 53).unwrap();
        UploadedFile {
            id: 1,
            original_name: "cat.png".to_string(),
            storage_url: "https://res.cloudinary.com/demo/image/upload/v1750978613/cat.png"
                .to_string(),
            file_size: size,
            content_type: Some(content_type.to_string()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn size_in_megabytes_is_rounded_to_two_places() {
        assert_eq!(record(Some(1_572_864), "image/png").file_size_mb(), Some(1.5));
        assert_eq!(record(Some(11), "text/plain").file_size_mb(), Some(0.0));
        assert_eq!(record(Some(5_000_000), "text/plain").file_size_mb(), Some(4.77));
    }

    #[test]
    fn missing_or_zero_size_has_no_megabytes() {
        assert_eq!(record(None, "image/png").file_size_mb(), None);
        assert_eq!(record(Some(0), "image/png").file_size_mb(), None);
        assert_eq!(record(Some(0), "image/png").file_size_display(), "Unknown");
    }

    #[test]
    fn human_readable_size_picks_a_unit() {
        assert_eq!(record(Some(512), "image/png").file_size_display(), "512 bytes");
        assert_eq!(record(Some(1536), "image/png").file_size_display(), "1.5 KB");
        assert_eq!(record(Some(3 * MIB), "image/png").file_size_display(), "3.00 MB");
        assert_eq!(record(Some(1536), "image/png").file_size_mb_display(), "0.00 MB");
    }

    #[test]
    fn cloudinary_links_get_transformations() {
        let file = record(Some(10), "image/png");
        assert_eq!(
            file.download_url(),
            "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1750978613/cat.png"
        );
        assert_eq!(
            file.thumbnail_url().as_deref(),
            Some("https://res.cloudinary.com/demo/image/upload/w_200,h_200,c_fit,q_auto/v1750978613/cat.png")
        );
    }

    #[test]
    fn documents_have_no_thumbnail() {
        let file = record(Some(10), "application/pdf");
        assert!(!file.is_image());
        assert_eq!(file.thumbnail_url(), None);
    }

    #[test]
    fn display_shows_name_and_minute() {
        assert_eq!(record(Some(1), "image/png").to_string(), "cat.png - 2025-06-26 22:56");
    }
}
