use async_trait::async_trait;

use crate::api::{endpoints, ApiClient};
use crate::error::ClientResult;
use crate::models::project::{ProjectEnvelope, ProjectsEnvelope};
use crate::models::Project;

use super::ContentFetcher;

#[derive(Debug, Clone)]
pub struct ProjectFetcher {
    api: ApiClient,
    page_size: usize,
}

impl ProjectFetcher {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self { api, page_size }
    }

    /// Single project, or `None` on any failure
    pub async fn by_id(&self, id: &str) -> Option<Project> {
        let result: ClientResult<ProjectEnvelope> = async {
            let url = self.api.url_with_segments(&endpoints::project(id))?;
            self.api.get_json(&url).await
        }
        .await;

        match result {
            Ok(envelope) => Some(Project::from_wire(envelope.project)),
            Err(e) => {
                tracing::warn!("failed to fetch project {}: {}", id, e);
                None
            }
        }
    }

    /// Newest first by creation date; undated projects keep backend order at the end.
    pub async fn latest(&self, limit: usize) -> Vec<Project> {
        let mut projects = self.all_or_empty().await;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects.truncate(limit);
        projects
    }
}

#[async_trait]
impl ContentFetcher for ProjectFetcher {
    type Item = Project;

    fn resource(&self) -> &'static str {
        "projects"
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Project>> {
        let envelope: ProjectsEnvelope = self.api.get_json(endpoints::PROJECTS).await?;
        Ok(envelope.projects.into_iter().map(Project::from_wire).collect())
    }

    fn search_text(item: &Project) -> String {
        item.title.clone()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
