use reqwest::{header::CONTENT_DISPOSITION, Method};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

use super::AdminClient;
use crate::api::{endpoints, ApiClient, FetchOptions};
use crate::content::{ContentFetcher, Listing};
use crate::error::{ClientError, ClientResult};
use crate::markdown::{export_filename, parse_document, parse_tags, reading_time_minutes, slugify};
use crate::models::blog::PostEnvelope;
use crate::models::loose_string;
use crate::models::{BlogPost, BlogPostUpdate};
use crate::upload::UploadSource;

/// Editable fields of a blog post; `tags` is the comma-separated input.
#[derive(Debug, Clone, Default)]
pub struct BlogEditForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: String,
    pub published: bool,
    pub featured_image: String,
}

impl BlogEditForm {
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.join(", "),
            published: post.published,
            featured_image: post.featured_image.clone(),
        }
    }

    /// Update body with the slug regenerated from the current title.
    pub fn to_update(&self) -> ClientResult<BlogPostUpdate> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ClientError::validation("Title and content are required"));
        }
        Ok(BlogPostUpdate {
            title: self.title.trim().to_string(),
            slug: slugify(&self.title),
            content: self.content.clone(),
            excerpt: self.excerpt.trim().to_string(),
            tags: parse_tags(&self.tags),
            published: self.published,
            featured_image: self.featured_image.trim().to_string(),
            reading_time: reading_time_minutes(&self.content),
        })
    }
}

/// What the backend reports after a markdown import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportedPost {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_deserializing)]
    pub message: String,
}

const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

impl AdminClient {
    pub async fn list_posts(&self, query: Option<&str>, page: usize) -> Listing<BlogPost> {
        self.posts().fetch(query, page).await
    }

    pub async fn post_count(&self) -> usize {
        self.posts().all_or_empty().await.len()
    }

    pub async fn load_post(&self, slug: &str) -> ClientResult<BlogPost> {
        let url = self.api().url_with_segments(&endpoints::blog_post(slug))?;
        let envelope: PostEnvelope = self
            .session()
            .authenticated_json(&url, &FetchOptions::default())
            .await?;
        Ok(BlogPost::from_wire(envelope.post))
    }

    /// Saves the form; returns the body that was sent, including the new slug.
    pub async fn update_post(&self, id: &str, form: &BlogEditForm) -> ClientResult<BlogPostUpdate> {
        let update = form.to_update()?;
        let url = self.api().url_with_segments(&endpoints::blog_post(id))?;
        self.session()
            .authenticated_send(&url, &FetchOptions::json(Method::PUT, json!(update)))
            .await?;
        tracing::info!("updated blog post {} (slug {})", id, update.slug);
        Ok(update)
    }

    pub async fn delete_post(&self, id: &str) -> ClientResult<()> {
        let url = self.api().url_with_segments(&endpoints::blog_post(id))?;
        self.session()
            .authenticated_send(&url, &FetchOptions::method(Method::DELETE))
            .await?;
        tracing::info!("deleted blog post {}", id);
        Ok(())
    }

    /// Imports one markdown file. Frontmatter is validated before anything is sent.
    pub async fn import_markdown(&self, files: Vec<UploadSource>) -> ClientResult<ImportedPost> {
        let mut files = files.into_iter();
        let file = match (files.next(), files.next()) {
            (Some(file), None) => file,
            (None, _) => return Err(ClientError::validation("Please select a markdown file")),
            (Some(_), Some(_)) => return Err(ClientError::validation("Please select a single markdown file")),
        };

        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !MARKDOWN_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ClientError::validation("Only .md and .markdown files are supported"));
        }

        let content = String::from_utf8(file.bytes)
            .map_err(|_| ClientError::validation("Markdown file is not valid UTF-8"))?;
        let parsed = parse_document(&content)?;
        tracing::debug!("importing '{}' as {}", parsed.frontmatter.title, parsed.slug);

        let options = FetchOptions::json(
            Method::POST,
            json!({ "content": content, "filename": file.file_name }),
        );
        let response = self
            .session()
            .authenticated_fetch(endpoints::BLOG_IMPORT_MD, &options)
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = ["details", "error"]
                .iter()
                .filter_map(|key| body.get(*key).and_then(Value::as_str))
                .find(|s| !s.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Import failed with HTTP {}", status.as_u16()));
            return Err(ClientError::api(status.as_u16(), message, Some(body)));
        }

        let mut imported: ImportedPost = body
            .get("post")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        imported.message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Imported")
            .to_string();
        tracing::info!("imported blog post {}", imported.slug);
        Ok(imported)
    }

    /// Returns `(filename, markdown)`.
    pub async fn export_markdown(&self, slug: &str) -> ClientResult<(String, String)> {
        let url = self.api().url_with_segments(&endpoints::blog_export_md(slug))?;
        let response = ApiClient::check(
            self.session()
                .authenticated_fetch(&url, &FetchOptions::default())
                .await?,
        )
        .await?;

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content = response.text().await?;
        Ok((export_filename(disposition.as_deref(), slug), content))
    }
}
