use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::api::{endpoints, ApiClient, FetchOptions};
use crate::auth::SessionStore;
use crate::error::ClientResult;
use crate::models::blog::{PostEnvelope, PostsEnvelope};
use crate::models::BlogPost;

use super::ContentFetcher;

/// Published posts, as the public blog shows them.
#[derive(Debug, Clone)]
pub struct PublicBlogFetcher {
    api: ApiClient,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Name(String),
    Counted { name: String },
}

#[derive(Debug, Deserialize)]
struct TagsEnvelope {
    #[serde(default)]
    tags: Vec<TagEntry>,
}

impl PublicBlogFetcher {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self { api, page_size }
    }

    pub async fn by_slug(&self, slug: &str) -> Option<BlogPost> {
        let result: ClientResult<PostEnvelope> = async {
            let url = self.api.url_with_segments(&endpoints::blog_post(slug))?;
            self.api.get_json(&url).await
        }
        .await;

        match result {
            Ok(envelope) => Some(BlogPost::from_wire(envelope.post)),
            Err(e) => {
                tracing::warn!("failed to fetch blog post '{}': {}", slug, e);
                None
            }
        }
    }

    /// Distinct tags, sorted. Falls back to the tags on published posts.
    pub async fn tags(&self) -> Vec<String> {
        let from_backend = match self.api.get_json::<TagsEnvelope>(endpoints::BLOG_TAGS).await {
            Ok(envelope) => envelope
                .tags
                .into_iter()
                .map(|entry| match entry {
                    TagEntry::Name(name) | TagEntry::Counted { name } => name,
                })
                .collect::<Vec<_>>(),
            Err(e) => {
                tracing::debug!("tag endpoint unavailable, deriving from posts: {}", e);
                Vec::new()
            }
        };

        let tags: Vec<String> = if from_backend.is_empty() {
            self.all_or_empty().await.into_iter().flat_map(|p| p.tags).collect()
        } else {
            from_backend
        };

        tags.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[async_trait]
impl ContentFetcher for PublicBlogFetcher {
    type Item = BlogPost;

    fn resource(&self) -> &'static str {
        "blog posts"
    }

    async fn fetch_all(&self) -> ClientResult<Vec<BlogPost>> {
        let envelope: PostsEnvelope = self.api.get_json(endpoints::BLOG_POSTS).await?;
        Ok(envelope
            .posts
            .into_iter()
            .map(BlogPost::from_wire)
            .filter(|p| p.published)
            .collect())
    }

    fn search_text(item: &BlogPost) -> String {
        item.search_text()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Every post including drafts; requires a session.
#[derive(Clone)]
pub struct AdminBlogFetcher {
    session: Arc<SessionStore>,
    page_size: usize,
}

impl AdminBlogFetcher {
    pub fn new(session: Arc<SessionStore>, page_size: usize) -> Self {
        Self { session, page_size }
    }
}

#[async_trait]
impl ContentFetcher for AdminBlogFetcher {
    type Item = BlogPost;

    fn resource(&self) -> &'static str {
        "admin blog posts"
    }

    async fn fetch_all(&self) -> ClientResult<Vec<BlogPost>> {
        let envelope: PostsEnvelope = self
            .session
            .authenticated_json(endpoints::BLOG_ADMIN_POSTS, &FetchOptions::default())
            .await?;
        Ok(envelope.posts.into_iter().map(BlogPost::from_wire).collect())
    }

    fn search_text(item: &BlogPost) -> String {
        item.search_text()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
