//! Files attached to customers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::customer::CustomerId;

pub type FileId = i64;

/// Coarse file category, derived from the MIME type at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(alias = "image")]
    Image,
    #[serde(alias = "document")]
    Document,
    #[serde(alias = "video")]
    Video,
    #[serde(alias = "other")]
    Other,
}

impl FileType {
    pub fn from_mime_type(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime == "application/pdf"
            || mime.starts_with("application/vnd.")
            || mime.starts_with("application/msword")
        {
            Self::Document
        } else {
            Self::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "이미지",
            Self::Document => "문서",
            Self::Video => "동영상",
            Self::Other => "기타",
        }
    }
}

/// File metadata as listed under a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFile {
    pub id: FileId,
    pub customer_id: CustomerId,
    pub file_path: String,
    pub file_type: FileType,
    pub file_size: Option<i64>,
    pub thumbnail_path: Option<String>,
    pub original_filename: Option<String>,
    pub mime_type: Option<String>,
    pub is_profile: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl CustomerFile {
    /// Name to show for the file: the uploaded name when known.
    pub fn display_name(&self) -> &str {
        self.original_filename
            .as_deref()
            .unwrap_or_else(|| self.file_path.rsplit('/').next().unwrap_or(&self.file_path))
    }
}

/// Response of an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_id: FileId,
    pub file_path: String,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_mime() {
        assert_eq!(FileType::from_mime_type("image/png"), FileType::Image);
        assert_eq!(FileType::from_mime_type("video/mp4"), FileType::Video);
        assert_eq!(FileType::from_mime_type("application/pdf"), FileType::Document);
        assert_eq!(
            FileType::from_mime_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            FileType::Document
        );
        assert_eq!(FileType::from_mime_type("application/msword"), FileType::Document);
        assert_eq!(FileType::from_mime_type("text/plain"), FileType::Other);
    }

    #[test]
    fn test_file_type_accepts_lowercase() {
        let t: FileType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(t, FileType::Image);
    }

    #[test]
    fn test_display_name_falls_back_to_path() {
        let file: CustomerFile = serde_json::from_value(serde_json::json!({
            "id": 1,
            "customer_id": 2,
            "file_path": "uploads/customers/2/abc.jpg",
            "file_type": "Image",
            "file_size": 1024,
            "thumbnail_path": null,
            "original_filename": null,
            "mime_type": "image/jpeg",
            "is_profile": true,
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00"
        }))
        .unwrap();
        assert_eq!(file.display_name(), "abc.jpg");
    }
}
