use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{pages, AppState};
use crate::api::endpoints;
use crate::content::ContentFetcher;
use crate::error::ClientError;
use crate::markdown::render_markdown;
use crate::models::skill::group_by_category;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
}

/// GET / - latest projects and skills by category
pub async fn home(State(state): State<AppState>) -> Html<String> {
    state.track("/");
    let ctx = state.ctx();
    let analytics = ctx.analytics.clone();
    tokio::spawn(async move {
        analytics.increment_site_visits().await;
    });

    let (projects, skills) = tokio::join!(
        ctx.projects.latest(ctx.config.content.latest_projects),
        ctx.skills.all_or_empty()
    );
    Html(pages::home_page(&projects, &group_by_category(&skills)))
}

pub async fn about(State(state): State<AppState>) -> Html<String> {
    state.track("/about");
    let skills = state.ctx().skills.all_or_empty().await;
    Html(pages::about_page(&group_by_category(&skills)))
}

pub async fn contacts(State(state): State<AppState>) -> Html<String> {
    state.track("/contacts");
    Html(pages::contacts_page())
}

pub async fn works(State(state): State<AppState>) -> Html<String> {
    state.track("/works");
    let ctx = state.ctx();
    let analytics = ctx.analytics.clone();
    tokio::spawn(async move {
        analytics.increment_project_views().await;
    });

    let projects = ctx.projects.all_or_empty().await;
    Html(pages::works_page(&projects))
}

/// GET /blog?q=&page=
pub async fn blog_list(State(state): State<AppState>, Query(query): Query<BlogQuery>) -> Html<String> {
    state.track("/blog");
    let ctx = state.ctx();
    let q = query.q.unwrap_or_default();
    let (listing, tags) = tokio::join!(
        ctx.blog.fetch(Some(q.as_str()), query.page.unwrap_or(1)),
        ctx.blog.tags()
    );
    Html(pages::blog_page(&listing, &q, &tags))
}

/// GET /blog/:slug
pub async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    state.track(&format!("/blog/{}", slug));
    let ctx = state.ctx();

    match ctx.blog.by_slug(&slug).await {
        Some(post) => {
            let analytics = ctx.analytics.clone();
            let view_slug = slug.clone();
            tokio::spawn(async move {
                analytics.increment_blog_post_views(&view_slug).await;
            });
            let html = render_markdown(&post.content);
            (StatusCode::OK, Html(pages::post_page(&post, &html))).into_response()
        }
        None => (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response(),
    }
}

/// GET /health - this server plus the backend it reads from
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ClientError> {
    let ctx = state.ctx();
    let backend: Value = ctx.api.get_json(endpoints::HEALTH).await?;
    Ok(Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "api_url": ctx.api.base_url(),
            "backend": backend,
        }
    })))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page()))
}
