//! Form-level admin operations. Every mutation goes through the session's
//! authenticated fetch, so a rejected token ends the session.

pub mod blog;
pub mod dashboard;
pub mod projects;
pub mod skills;

pub use blog::{BlogEditForm, ImportedPost};
pub use dashboard::DashboardData;
pub use projects::{ProjectEditor, ProjectForm};
pub use skills::SkillForm;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::content::{AdminBlogFetcher, AnalyticsFetcher, ProjectFetcher, SkillFetcher};
use crate::upload::Uploader;

#[derive(Clone)]
pub struct AdminClient {
    session: Arc<SessionStore>,
    uploader: Uploader,
    page_size: usize,
}

impl AdminClient {
    pub fn new(session: Arc<SessionStore>, page_size: usize) -> Self {
        Self {
            uploader: Uploader::new(session.clone()),
            session,
            page_size,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn uploader(&self) -> &Uploader {
        &self.uploader
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    pub fn projects(&self) -> ProjectFetcher {
        ProjectFetcher::new(self.api().clone(), self.page_size)
    }

    pub fn skills(&self) -> SkillFetcher {
        SkillFetcher::new(self.api().clone(), self.page_size)
    }

    pub fn posts(&self) -> AdminBlogFetcher {
        AdminBlogFetcher::new(self.session.clone(), self.page_size)
    }

    pub fn analytics(&self) -> AnalyticsFetcher {
        AnalyticsFetcher::new(self.api().clone())
    }
}

/// Deserializes `body[key]` when the backend echoes the saved resource.
fn echoed<T: DeserializeOwned>(body: &Value, key: &str) -> Option<T> {
    body.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

fn require(fields: &[&str], message: &str) -> crate::error::ClientResult<()> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(crate::error::ClientError::validation(message));
    }
    Ok(())
}
