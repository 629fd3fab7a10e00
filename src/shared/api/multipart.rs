// src/shared/api/multipart.rs
use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures::{StreamExt, TryStreamExt};

use crate::shared::api::ApiResponse;

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;
const MAX_PARTS: usize = 32;

/// A file part read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Trimmed, non-empty text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Takes a non-empty file part out of the form.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|f| !f.bytes.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MultipartReadError {
    #[error("Malformed multipart payload: {0}")]
    Malformed(String),

    #[error("Part '{field}' exceeds the {limit} byte limit")]
    TooLarge { field: String, limit: usize },

    #[error("Text field '{0}' is not valid UTF-8")]
    InvalidText(String),

    #[error("Part '{0}' was sent more than once")]
    DuplicatePart(String),

    #[error("Form carries more than {0} parts")]
    TooManyParts(usize),
}

impl MultipartReadError {
    pub fn to_response(&self) -> HttpResponse {
        match self {
            MultipartReadError::TooLarge { .. } => {
                ApiResponse::payload_too_large("FILE_TOO_LARGE", &self.to_string())
            }
            MultipartReadError::TooManyParts(_) => {
                ApiResponse::payload_too_large("TOO_MANY_PARTS", &self.to_string())
            }
            _ => ApiResponse::bad_request("INVALID_MULTIPART", &self.to_string()),
        }
    }
}

/// Drains a multipart payload, keeping only the parts named in `expected`.
/// Parts carrying a filename become files, everything else is treated as a
/// UTF-8 text field. Other parts are read through and discarded.
pub async fn read_multipart(
    mut payload: Multipart,
    expected: &[&str],
    max_file_bytes: usize,
) -> Result<MultipartForm, MultipartReadError> {
    let mut form = MultipartForm::default();
    let mut parts = 0;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| MultipartReadError::Malformed(e.to_string()))?;

        parts += 1;
        if parts > MAX_PARTS {
            return Err(MultipartReadError::TooManyParts(MAX_PARTS));
        }

        let name = field.name().unwrap_or_default().to_string();
        let keep = expected.contains(&name.as_str());
        if keep && (form.fields.contains_key(&name) || form.files.contains_key(&name)) {
            return Err(MultipartReadError::DuplicatePart(name));
        }
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|m| m.essence_str().to_string());

        let limit = if file_name.is_some() {
            max_file_bytes
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut bytes = Vec::new();
        let mut seen = 0;
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| MultipartReadError::Malformed(e.to_string()))?
        {
            seen += chunk.len();
            if seen > limit {
                return Err(MultipartReadError::TooLarge { field: name, limit });
            }
            if keep {
                bytes.extend_from_slice(&chunk);
            }
        }

        if !keep {
            continue;
        }

        match file_name {
            Some(file_name) => {
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            }
            None => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| MultipartReadError::InvalidText(name.clone()))?;
                form.fields.insert(name, text);
            }
        }
    }

    Ok(form)
}
