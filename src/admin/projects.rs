use reqwest::Method;
use serde_json::json;

use super::{echoed, require, AdminClient};
use crate::api::{endpoints, FetchOptions};
use crate::content::ContentFetcher;
use crate::error::{ClientError, ClientResult};
use crate::models::project::dedupe_tools;
use crate::models::{Project, ProjectInput, ProjectStatus, ProjectTool, Skill, UploadedFile, WireProject};
use crate::upload::ImageField;

pub const REQUIRED_PROJECT_FIELDS: &str = "Please fill in all required fields (Title, Description, Status, Image)";

/// State of the project create/edit form
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub link: String,
    pub status: String,
    pub tools: Vec<ProjectTool>,
    pub image: ImageField,
    /// Generic upload made from this form, renamed once the project exists
    pub temp_upload: Option<UploadedFile>,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            link: project.link.clone(),
            status: project.status.to_string(),
            tools: project.tools.clone(),
            image: ImageField::with_original(project.image.clone()),
            temp_upload: None,
        }
    }

    pub fn attach_upload(&mut self, file: UploadedFile) {
        self.image.set_uploaded(&file);
        self.temp_upload = file.is_temporary.then_some(file);
    }

    /// New projects need an image.
    fn validate(&self) -> ClientResult<ProjectInput> {
        let image = self.image.current().unwrap_or_default();
        require(&[image], REQUIRED_PROJECT_FIELDS)?;
        self.validate_for_update()
    }

    /// Edits may clear the image; it is saved as an empty string.
    fn validate_for_update(&self) -> ClientResult<ProjectInput> {
        let image = self.image.current().unwrap_or_default();
        require(
            &[self.title.as_str(), self.description.as_str(), self.status.as_str()],
            REQUIRED_PROJECT_FIELDS,
        )?;
        Ok(ProjectInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: image.to_string(),
            link: self.link.trim().to_string(),
            status: ProjectStatus::parse(&self.status).to_string(),
            tools: dedupe_tools(self.tools.clone()),
        })
    }
}

/// A project loaded for editing along with the tool picker's skills
#[derive(Debug, Clone)]
pub struct ProjectEditor {
    pub project: Project,
    pub form: ProjectForm,
    pub skills: Vec<Skill>,
}

impl AdminClient {
    /// Creates the project, then renames its temporary image after the new id.
    pub async fn create_project(&self, form: ProjectForm) -> ClientResult<Project> {
        let input = form.validate()?;

        let options = FetchOptions::json(Method::POST, json!(input));
        let body = self
            .session()
            .authenticated_send(endpoints::PROJECTS, &options)
            .await?;
        let mut project = echoed::<WireProject>(&body, "project")
            .map(Project::from_wire)
            .ok_or_else(|| ClientError::parse("create response did not include the project"))?;

        tracing::info!("created project {} ({})", project.title, project.id);

        if let Some(temp) = form.temp_upload.as_ref().filter(|t| t.url == input.image) {
            if let Some(renamed) = self.uploader().rename_after_create(&project.id, &temp.url).await {
                project.image = renamed;
            }
        }

        Ok(project)
    }

    /// Loads the project and the skill list concurrently.
    pub async fn load_project_editor(&self, id: &str) -> ClientResult<ProjectEditor> {
        let projects = self.projects();
        let skills = self.skills();
        let (project, skills) = tokio::join!(projects.by_id(id), skills.sorted());

        let project = project.ok_or_else(|| ClientError::api(404, format!("Project '{id}' not found"), None))?;
        Ok(ProjectEditor {
            form: ProjectForm::from_project(&project),
            project,
            skills,
        })
    }

    /// Saves, then runs the deferred image delete. A failed save deletes nothing.
    pub async fn update_project(&self, id: &str, form: &mut ProjectForm) -> ClientResult<Project> {
        let input = form.validate_for_update()?;

        let url = self.api().url_with_segments(&endpoints::project(id))?;
        let options = FetchOptions::json(Method::PUT, json!(input));
        let body = self.session().authenticated_send(&url, &options).await?;

        tracing::info!("updated project {}", id);
        form.image.commit(self.uploader()).await;
        Ok(echoed::<WireProject>(&body, "project")
            .map(Project::from_wire)
            .unwrap_or_else(|| Project::from_wire(WireProject {
                id: id.to_string(),
                title: input.title,
                description: input.description,
                image: input.image,
                link: input.link,
                status: input.status,
                tools: json!(input.tools),
                ..WireProject::default()
            })))
    }

    pub async fn delete_project(&self, id: &str) -> ClientResult<()> {
        let url = self.api().url_with_segments(&endpoints::project(id))?;
        self.session()
            .authenticated_send(&url, &FetchOptions::method(Method::DELETE))
            .await?;
        tracing::info!("deleted project {}", id);
        Ok(())
    }

    pub async fn project_count(&self) -> usize {
        self.projects().all_or_empty().await.len()
    }
}
