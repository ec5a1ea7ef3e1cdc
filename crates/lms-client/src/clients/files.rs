use super::parse_response;
use crate::error::Result;
use crate::schema::{CreateFileRequest, CreateFileResponse, GetFileResponse};
use crate::transport::{FilePart, MultipartBody, RawResponse, Transport};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const FILES_PATH: &str = "/api/v1/files";

/// Form field the server reads the file content from.
pub const UPLOAD_FIELD: &str = "upload_file";

/// Client for `/api/v1/files`.
#[derive(Clone)]
pub struct FilesClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FilesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilesClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl FilesClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_file_api(&self, file_id: &str) -> Result<RawResponse> {
        self.transport.get(&item_path(file_id), &[]).await
    }

    /// Uploads `request.upload_file` as multipart form data.
    ///
    /// Reading the local file happens before anything is sent, so a missing
    /// file is an [`crate::LmsError::Io`], not a transport error.
    pub async fn create_file_api(&self, request: &CreateFileRequest) -> Result<RawResponse> {
        let content = tokio::fs::read(&request.upload_file).await?;
        debug!(
            "Uploading {} ({} bytes) as {}/{}",
            request.upload_file.display(),
            content.len(),
            request.directory,
            request.filename
        );

        let body = MultipartBody {
            fields: vec![
                ("filename".to_string(), request.filename.clone()),
                ("directory".to_string(), request.directory.clone()),
            ],
            files: vec![FilePart {
                field_name: UPLOAD_FIELD.to_string(),
                file_name: upload_name(request),
                content,
            }],
        };
        self.transport.post_multipart(FILES_PATH, body).await
    }

    pub async fn delete_file_api(&self, file_id: &str) -> Result<RawResponse> {
        self.transport.delete(&item_path(file_id)).await
    }

    pub async fn create_file(&self, request: &CreateFileRequest) -> Result<CreateFileResponse> {
        parse_response(&self.create_file_api(request).await?)
    }

    pub async fn get_file(&self, file_id: &str) -> Result<GetFileResponse> {
        parse_response(&self.get_file_api(file_id).await?)
    }
}

fn item_path(file_id: &str) -> String {
    format!("{}/{}", FILES_PATH, file_id)
}

fn upload_name(request: &CreateFileRequest) -> String {
    request
        .upload_file
        .file_name()
        .map_or_else(|| request.filename.clone(), |name| name.to_string_lossy().into_owned())
}
