use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use crate::api::{endpoints, ApiClient, FetchOptions};
use crate::auth::SessionStore;
use crate::error::{ClientError, ClientResult};
use crate::models::upload::RenameResponse;
use crate::models::{UploadedFile, WireUpload};

/// Where an upload is stored and how the backend names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    /// Timestamped name; renamed once the owning project exists
    Generic,
    /// Named after the skill
    Skill(String),
    /// Named after an existing project
    Project(String),
}

impl UploadMode {
    fn is_temporary(&self) -> bool {
        matches!(self, UploadMode::Generic)
    }

    /// Local checks, run before anything touches the network.
    pub fn validate(&self) -> ClientResult<()> {
        match self {
            UploadMode::Skill(name) if name.trim().is_empty() => {
                Err(ClientError::validation("Please enter a skill name before uploading an icon"))
            }
            UploadMode::Project(id) if id.trim().is_empty() => {
                Err(ClientError::validation("Project ID is required for a project upload"))
            }
            _ => Ok(()),
        }
    }

    fn endpoint(&self, api: &ApiClient) -> ClientResult<String> {
        self.validate()?;
        match self {
            UploadMode::Generic => Ok(api.url(endpoints::UPLOAD)),
            UploadMode::Skill(name) => api.url_with_segments(&endpoints::upload_skill(name.trim())),
            UploadMode::Project(id) => api.url_with_segments(&endpoints::upload_project(id.trim())),
        }
    }
}

/// A local file selected for upload
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadSource {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::validation(format!("'{}' has no usable file name", path.display())))?
            .to_string();
        Ok(Self { file_name, bytes })
    }

    fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            "md" | "markdown" => "text/markdown",
            _ => "application/octet-stream",
        }
    }
}

/// Upload, rename and delete calls against the backend's upload endpoints.
#[derive(Clone)]
pub struct Uploader {
    session: Arc<SessionStore>,
}

impl Uploader {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    /// Uploads the single selected file. Validation failures never reach the network.
    pub async fn select_and_upload(&self, files: Vec<UploadSource>, mode: &UploadMode) -> ClientResult<UploadedFile> {
        let mut files = files.into_iter();
        let file = match (files.next(), files.next()) {
            (None, _) => return Err(ClientError::validation("No file selected")),
            (Some(_), Some(_)) => return Err(ClientError::validation("Only one file can be uploaded at a time")),
            (Some(file), None) => file,
        };

        let api = self.api();
        let url = mode.endpoint(api)?;

        let original_name = file.file_name.clone();
        let mime = file.mime_type();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime)
            .map_err(|e| ClientError::validation(format!("Invalid file type: {e}")))?;
        let form = Form::new().part("file", part);

        let request = api.http().request(Method::POST, &url).multipart(form);
        let response = ApiClient::check(self.session.authenticated_execute(request).await?).await?;
        let wire: WireUpload = ApiClient::read_json(response).await?;

        if wire.url.is_empty() {
            return Err(ClientError::parse("upload response carried no url"));
        }

        let uploaded = UploadedFile {
            filename: wire.filename,
            url: api.absolute_upload_url(&wire.url),
            size: wire.size,
            is_temporary: mode.is_temporary(),
            original_name,
        };
        tracing::info!(
            filename = %uploaded.filename,
            temporary = uploaded.is_temporary,
            "uploaded {} ({} bytes)",
            uploaded.original_name,
            uploaded.size
        );
        Ok(uploaded)
    }

    /// Renames a temporary upload after its project exists.
    ///
    /// Returns the new URL, or `None` when the rename failed and the temporary
    /// name stays in use.
    pub async fn rename_after_create(&self, project_id: &str, temp_url: &str) -> Option<String> {
        let result: ClientResult<RenameResponse> = async {
            let url = self.api().url_with_segments(&endpoints::upload_rename(project_id))?;
            let options = FetchOptions::json(Method::POST, json!({ "oldImageUrl": temp_url }));
            self.session.authenticated_json(&url, &options).await
        }
        .await;

        match result {
            Ok(renamed) if !renamed.new_image_url.is_empty() => {
                let url = self.api().absolute_upload_url(&renamed.new_image_url);
                tracing::info!("renamed project {} image to {}", project_id, url);
                Some(url)
            }
            Ok(_) => {
                tracing::warn!("rename for project {} returned no new image url", project_id);
                None
            }
            Err(e) => {
                tracing::warn!("failed to rename image for project {}: {}", project_id, e);
                None
            }
        }
    }

    /// Deletes a backend-local upload. Other URLs are left alone.
    pub async fn delete_uploaded_file(&self, image_url: &str) -> bool {
        if !self.api().is_local_upload(image_url) {
            tracing::debug!("skipping delete of non-local image {}", image_url);
            return false;
        }

        let filename = match image_url.rsplit("/uploads/").next().filter(|f| !f.is_empty()) {
            Some(filename) => filename,
            None => {
                tracing::warn!("could not extract a filename from {}", image_url);
                return false;
            }
        };

        let options = FetchOptions::method(Method::DELETE);
        match self
            .session
            .authenticated_send(&endpoints::uploaded_file(filename), &options)
            .await
        {
            Ok(_) => {
                tracing::debug!("deleted uploaded file {}", filename);
                true
            }
            Err(e) => {
                tracing::warn!("failed to delete uploaded file {}: {}", filename, e);
                false
            }
        }
    }
}
