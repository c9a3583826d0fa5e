use chrono::NaiveDate;
use serde::Serialize;

use super::AdminClient;
use crate::models::ChartPoint;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub visits: u64,
    pub project_views: u64,
    pub blog_views: u64,
    pub visit_series: Vec<ChartPoint>,
    pub project_view_series: Vec<ChartPoint>,
    pub project_count: usize,
    pub skill_count: usize,
    pub post_count: usize,
}

impl AdminClient {
    /// Loads every dashboard tile concurrently; a failed source shows as zero.
    pub async fn load_dashboard(&self, today: NaiveDate) -> DashboardData {
        let analytics = self.analytics();
        let (summary, visit_series, project_view_series, project_count, skill_count, post_count) = tokio::join!(
            analytics.summary(),
            analytics.visit_series(today),
            analytics.project_view_series(today),
            self.project_count(),
            self.skill_count(),
            self.post_count(),
        );

        DashboardData {
            visits: summary.visits,
            project_views: summary.project_view,
            blog_views: summary.blog_views,
            visit_series,
            project_view_series,
            project_count,
            skill_count,
            post_count,
        }
    }
}
