use async_trait::async_trait;

use crate::api::{endpoints, ApiClient};
use crate::error::ClientResult;
use crate::models::skill::{categories_of, CategoriesEnvelope, SkillsEnvelope};
use crate::models::Skill;

use super::ContentFetcher;

#[derive(Debug, Clone)]
pub struct SkillFetcher {
    api: ApiClient,
    page_size: usize,
}

impl SkillFetcher {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self { api, page_size }
    }

    /// All skills sorted by name, as the tool picker lists them
    pub async fn sorted(&self) -> Vec<Skill> {
        let mut skills = self.all_or_empty().await;
        skills.sort_by_key(|s| s.skill.to_lowercase());
        skills
    }

    /// Category names from the backend, else derived from the skills themselves
    pub async fn categories(&self) -> Vec<String> {
        match self.api.get_json::<CategoriesEnvelope>(endpoints::SKILL_CATEGORIES).await {
            Ok(envelope) => {
                let mut categories: Vec<String> = Vec::new();
                for category in envelope.categories {
                    let category = category.trim();
                    if !category.is_empty() && !categories.iter().any(|c| c == category) {
                        categories.push(category.to_string());
                    }
                }
                if !categories.is_empty() {
                    return categories;
                }
            }
            Err(e) => tracing::debug!("category endpoint unavailable, deriving from skills: {}", e),
        }
        categories_of(&self.all_or_empty().await)
    }
}

#[async_trait]
impl ContentFetcher for SkillFetcher {
    type Item = Skill;

    fn resource(&self) -> &'static str {
        "skills"
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Skill>> {
        let envelope: SkillsEnvelope = self.api.get_json(endpoints::SKILLS).await?;
        Ok(envelope.skills)
    }

    fn search_text(item: &Skill) -> String {
        item.skill.clone()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
