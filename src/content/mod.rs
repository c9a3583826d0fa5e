//! Read-side accessors for the public site and the admin surface.
//!
//! Fetchers never fail: backend errors are logged and turned into empty shapes.

pub mod analytics;
pub mod blog;
pub mod listing;
pub mod projects;
pub mod skills;

pub use analytics::AnalyticsFetcher;
pub use blog::{AdminBlogFetcher, PublicBlogFetcher};
pub use listing::{filter_and_paginate, paginate, Listing, TextFilter};
pub use projects::ProjectFetcher;
pub use skills::SkillFetcher;

use async_trait::async_trait;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::ClientResult;

/// A collection the client filters and pages locally.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    /// Resource name used in log lines
    fn resource(&self) -> &'static str;

    async fn fetch_all(&self) -> ClientResult<Vec<Self::Item>>;

    /// Text a query is matched against
    fn search_text(item: &Self::Item) -> String;

    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// The full collection, or empty on any failure
    async fn all_or_empty(&self) -> Vec<Self::Item> {
        match self.fetch_all().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("failed to fetch {}: {}", self.resource(), e);
                Vec::new()
            }
        }
    }

    async fn fetch(&self, query: Option<&str>, page: usize) -> Listing<Self::Item> {
        let items = self.all_or_empty().await;
        filter_and_paginate(items, query, page, self.page_size(), Self::search_text)
    }
}
