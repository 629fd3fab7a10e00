use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("File is empty")]
    Empty,

    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File name is too long")]
    FileNameTooLong,
}

/// What a given upload slot accepts.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_file_name_len: usize,
    pub allowed_mime_types: &'static [&'static str],
}

impl UploadPolicy {
    pub const IMAGE_MIME_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/png", "image/webp"];
    pub const DOCUMENT_MIME_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/png", "image/webp", "application/pdf"];

    /// Identity documents: images or PDF scans.
    pub fn kyc_documents(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes,
            max_file_name_len: 255,
            allowed_mime_types: Self::DOCUMENT_MIME_TYPES,
        }
    }

    /// Profile pictures: images only, capped at 5 MiB or the global cap if lower.
    pub fn avatar(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes: max_file_size_bytes.min(5 * 1024 * 1024),
            max_file_name_len: 255,
            allowed_mime_types: Self::IMAGE_MIME_TYPES,
        }
    }

    /// Returns the normalised mime type on success.
    pub fn check(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        size: u64,
    ) -> Result<String, UploadRejection> {
        if size == 0 {
            return Err(UploadRejection::Empty);
        }
        if size > self.max_file_size_bytes {
            return Err(UploadRejection::TooLarge {
                limit: self.max_file_size_bytes,
            });
        }
        if file_name.len() > self.max_file_name_len {
            return Err(UploadRejection::FileNameTooLong);
        }

        let mime = content_type
            .map(|c| c.split(';').next().unwrap_or("").trim().to_lowercase())
            .filter(|c| !c.is_empty() && c != "application/octet-stream")
            .or_else(|| mime_from_extension(file_name).map(str::to_string))
            .unwrap_or_default();

        if !self.allowed_mime_types.contains(&mime.as_str()) {
            return Err(UploadRejection::UnsupportedType(if mime.is_empty() {
                "unknown".to_string()
            } else {
                mime
            }));
        }

        Ok(mime)
    }
}

pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
