use reqwest::Method;
use serde_json::json;

use super::{echoed, require, AdminClient};
use crate::api::{endpoints, FetchOptions};
use crate::content::ContentFetcher;
use crate::error::{ClientError, ClientResult};
use crate::models::{Skill, SkillInput};
use crate::upload::{UploadMode, UploadSource};

/// Skill create form; the icon is either an uploaded file or a URL.
#[derive(Debug, Clone, Default)]
pub struct SkillForm {
    pub skill: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub icon_file: Option<UploadSource>,
}

impl AdminClient {
    pub async fn create_skill(&self, form: SkillForm) -> ClientResult<Skill> {
        require(&[form.skill.as_str(), form.category.as_str()], "Skill name and category are required")?;
        let name = form.skill.trim().to_string();

        let icon = match form.icon_file {
            Some(file) => {
                self.uploader()
                    .select_and_upload(vec![file], &UploadMode::Skill(name.clone()))
                    .await?
                    .url
            }
            None => form.icon_url.unwrap_or_default().trim().to_string(),
        };
        if icon.is_empty() {
            return Err(ClientError::validation("Please upload an icon or enter an icon URL"));
        }

        let input = SkillInput {
            skill: name,
            category: form.category.trim().to_string(),
            icon,
        };
        let options = FetchOptions::json(Method::POST, json!(input));
        let body = self.session().authenticated_send(endpoints::SKILLS, &options).await?;

        tracing::info!("created skill {}", input.skill);
        Ok(echoed::<Skill>(&body, "skill").unwrap_or(Skill {
            id: String::new(),
            skill: input.skill,
            icon: input.icon,
            category: input.category,
        }))
    }

    pub async fn delete_skill(&self, id: &str) -> ClientResult<()> {
        let url = self.api().url_with_segments(&endpoints::skill(id))?;
        self.session()
            .authenticated_send(&url, &FetchOptions::method(Method::DELETE))
            .await?;
        tracing::info!("deleted skill {}", id);
        Ok(())
    }

    pub async fn skill_count(&self) -> usize {
        self.skills().all_or_empty().await.len()
    }
}
