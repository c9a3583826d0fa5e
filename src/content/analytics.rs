use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::json;

use crate::api::{endpoints, ApiClient};
use crate::error::ClientResult;
use crate::models::{AnalyticsSummary, ChartPoint};

/// Analytics reads for the dashboard and best-effort tracking writes for the site.
#[derive(Debug, Clone)]
pub struct AnalyticsFetcher {
    api: ApiClient,
}

impl AnalyticsFetcher {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Totals and daily counters; all zero on failure
    pub async fn summary(&self) -> AnalyticsSummary {
        // Cache-busting timestamp; the backend ignores it
        let request = self
            .api
            .request(Method::GET, endpoints::ANALYTICS_ALL)
            .query(&[("t", Utc::now().timestamp_millis().to_string())]);

        match self.api.send_json::<AnalyticsSummary>(request).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("failed to fetch analytics: {}", e);
                AnalyticsSummary::default()
            }
        }
    }

    pub async fn visit_series(&self, today: NaiveDate) -> Vec<ChartPoint> {
        self.summary().await.visit_series(today)
    }

    pub async fn project_view_series(&self, today: NaiveDate) -> Vec<ChartPoint> {
        self.summary().await.project_view_series(today)
    }

    pub async fn track_page_visit(&self, page: &str, duration_secs: u64) -> bool {
        let request = self
            .api
            .request(Method::POST, endpoints::ANALYTICS_VISIT)
            .json(&json!({ "page": page, "duration": duration_secs }));
        self.best_effort("page visit", self.send(request).await)
    }

    pub async fn increment_site_visits(&self) -> bool {
        self.best_effort("site visit counter", self.api.post_empty(endpoints::LEGACY_COUNTER).await)
    }

    pub async fn increment_project_views(&self) -> bool {
        self.best_effort(
            "project views counter",
            self.api.post_empty(endpoints::LEGACY_PROJECT_VIEWS).await,
        )
    }

    pub async fn track_project_view(&self, project_id: &str, source: &str) -> bool {
        let result: ClientResult<()> = async {
            let url = self.api.url_with_segments(&endpoints::project_views(project_id))?;
            let request = self.api.request(Method::POST, &url).json(&json!({ "source": source }));
            self.send(request).await
        }
        .await;
        self.best_effort("project view", result)
    }

    pub async fn increment_blog_post_views(&self, slug: &str) -> bool {
        let result: ClientResult<()> = async {
            let url = self.api.url_with_segments(&endpoints::blog_post_views(slug))?;
            self.send(self.api.request(Method::POST, &url)).await
        }
        .await;
        self.best_effort("blog post view", result)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ClientResult<()> {
        ApiClient::check(self.api.execute(request).await?).await?;
        Ok(())
    }

    fn best_effort(&self, what: &str, result: ClientResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to track {}: {}", what, e);
                false
            }
        }
    }
}
