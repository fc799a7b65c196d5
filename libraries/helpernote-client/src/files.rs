//! Customer file attachments and profile photos.

use std::path::Path;

use crate::envelope::page;
use crate::error::{ClientError, Result};
use crate::transport::Transport;
use helpernote_core::{CoreError, CustomerFile, CustomerId, FileId, FileType, Page, UploadedFile};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

pub struct FilesClient<'a> {
    transport: &'a Transport,
}

impl<'a> FilesClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, customer_id: CustomerId) -> Result<Page<CustomerFile>> {
        let value = self
            .transport
            .get(&format!("/api/customers/{}/files", customer_id))
            .await?;
        page(value, "files")
    }

    /// Attach a file to a customer.
    pub async fn upload(&self, customer_id: CustomerId, file_path: &Path) -> Result<UploadedFile> {
        let upload = LocalFile::read(file_path).await?;
        self.send(&format!("/api/customers/{}/files", customer_id), &upload)
            .await
    }

    /// Upload an image and make it the customer's profile photo.
    ///
    /// Non-image files are rejected before anything is sent.
    pub async fn upload_profile_photo(
        &self,
        customer_id: CustomerId,
        file_path: &Path,
    ) -> Result<UploadedFile> {
        if FileType::from_mime_type(mime_type_for_file(file_path)) != FileType::Image {
            return Err(CoreError::validation("file", "이미지 파일만 업로드할 수 있습니다").into());
        }
        let upload = LocalFile::read(file_path).await?;
        self.send(
            &format!("/api/customers/{}/profile-photo", customer_id),
            &upload,
        )
        .await
    }

    pub async fn delete(&self, customer_id: CustomerId, file_id: FileId) -> Result<()> {
        self.transport
            .delete(&format!("/api/customers/{}/files/{}", customer_id, file_id))
            .await
    }

    async fn send(&self, path: &str, upload: &LocalFile) -> Result<UploadedFile> {
        let value = self
            .transport
            .post_multipart(path, || upload.form())
            .await?;
        let uploaded: UploadedFile = serde_json::from_value(value).map_err(|e| {
            ClientError::Parse(format!("Failed to parse upload response: {}", e))
        })?;

        info!(
            file_id = uploaded.file_id,
            file = %upload.file_name,
            size = upload.contents.len(),
            "File uploaded"
        );
        Ok(uploaded)
    }
}

struct LocalFile {
    file_name: String,
    mime_type: &'static str,
    contents: Vec<u8>,
}

impl LocalFile {
    async fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClientError::FileNotFound(path.display().to_string()));
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        debug!(file = %path.display(), "Reading file for upload");

        Ok(Self {
            file_name,
            mime_type: mime_type_for_file(path),
            contents: tokio::fs::read(path).await?,
        })
    }

    fn form(&self) -> Result<Form> {
        let part = Part::bytes(self.contents.clone())
            .file_name(self.file_name.clone())
            .mime_str(self.mime_type)?;
        Ok(Form::new().part("file", part))
    }
}

/// Get MIME type from the file extension.
fn mime_type_for_file(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("hwp") => "application/x-hwp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
