//! Checks an incoming multipart file against the upload policy.
//!
//! Failures are reported per field so the API can answer with
//! `{"file": ["reason"]}` the same way for every rule.

use crate::{
    application::error::FieldErrors,
    domain::{config::upload::UploadPolicy, models::file::FileData},
};

pub const FILE_FIELD: &str = "file";
pub const MAX_FILENAME_LENGTH: usize = 255;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A `file` part as read off the wire, before any checks.
#[derive(Debug, Clone, Default)]
pub struct IncomingFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl IncomingFile {
    /// Essence of the declared part type (no parameters, lowercased),
    /// else a guess from the extension.
    pub fn resolved_content_type(&self) -> String {
        if let Some(declared) = self
            .content_type
            .as_deref()
            .map(essence)
            .filter(|ct| !ct.is_empty())
        {
            return declared;
        }

        self.filename
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first_raw())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string()
    }
}

/// `text/plain; charset=utf-8` becomes `text/plain`.
fn essence(content_type: &str) -> String {
    match content_type.parse::<mime_guess::Mime>() {
        Ok(mime) => mime.essence_str().to_string(),
        Err(_) => content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase(),
    }
}

fn reject(message: String) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(FILE_FIELD.to_string(), vec![message]);
    errors
}

pub fn validate_upload(
    upload: Option<IncomingFile>,
    policy: &UploadPolicy,
) -> Result<FileData, FieldErrors> {
    let upload = upload.ok_or_else(|| reject("No file was submitted.".to_string()))?;

    let filename = upload
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| reject("No filename could be determined.".to_string()))?;

    if upload.content.is_empty() {
        return Err(reject("The submitted file is empty.".to_string()));
    }

    let name_length = filename.chars().count();
    if name_length > MAX_FILENAME_LENGTH {
        return Err(reject(format!(
            "Ensure this filename has at most {} characters (it has {}).",
            MAX_FILENAME_LENGTH, name_length
        )));
    }

    if upload.content.len() as u64 > policy.max_size {
        return Err(reject(format!(
            "File size cannot exceed {}MB",
            policy.max_size_mb_label()
        )));
    }

    let content_type = upload.resolved_content_type();
    if !policy.allows(&content_type) {
        return Err(reject(format!(
            "File type '{}' is not supported. Allowed types: {}",
            content_type,
            policy.allowed_types.join(", ")
        )));
    }

    Ok(FileData::new(upload.content, filename, content_type))
}
