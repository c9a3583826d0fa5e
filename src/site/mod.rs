//! Public portfolio pages rendered from backend data.

pub mod handlers;
pub mod pages;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::content::{AnalyticsFetcher, ProjectFetcher, PublicBlogFetcher, SkillFetcher};
use crate::error::ClientResult;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    inner: Arc<SiteContext>,
}

pub struct SiteContext {
    pub config: AppConfig,
    pub api: ApiClient,
    pub projects: ProjectFetcher,
    pub skills: SkillFetcher,
    pub blog: PublicBlogFetcher,
    pub analytics: AnalyticsFetcher,
}

impl AppState {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let page_size = config.content.page_size;
        Ok(Self {
            inner: Arc::new(SiteContext {
                projects: ProjectFetcher::new(api.clone(), page_size),
                skills: SkillFetcher::new(api.clone(), page_size),
                blog: PublicBlogFetcher::new(api.clone(), page_size),
                analytics: AnalyticsFetcher::new(api.clone()),
                api,
                config,
            }),
        })
    }

    pub fn ctx(&self) -> &SiteContext {
        &self.inner
    }

    /// Fires a page-visit event without holding up the response.
    pub fn track(&self, page: &str) {
        if !self.inner.config.site.track_visits {
            return;
        }
        let analytics = self.inner.analytics.clone();
        let page = page.to_string();
        tokio::spawn(async move {
            analytics.track_page_visit(&page, 0).await;
        });
    }
}

pub fn router(state: AppState) -> Router {
    let site = &state.ctx().config.site;
    let enable_cors = site.enable_cors;
    let enable_request_logging = site.enable_request_logging;

    let mut app = Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/contacts", get(handlers::contacts))
        .route("/works", get(handlers::works))
        .route("/blog", get(handlers::blog_list))
        .route("/blog/:slug", get(handlers::blog_post))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state);

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}
