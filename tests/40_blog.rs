mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::MockBackend;
use portfolio_client::admin::BlogEditForm;
use portfolio_client::api::endpoints;
use portfolio_client::content::{ContentFetcher, PublicBlogFetcher};
use portfolio_client::error::ClientError;
use portfolio_client::site::{self, AppState};
use portfolio_client::upload::UploadSource;

const IMPORT: &str = "---\ntitle: Hello World\ntags: [rust, web]\n---\n\n# Hello\n\nThis is the first real paragraph of the post.\n";

fn posts() -> Value {
    json!({ "posts": [
        {
            "id": 1, "slug": "async-rust", "title": "Async Rust",
            "content": "# Futures\n\nPolled by **tokio**.", "tags": ["rust", "async"],
            "published": true, "reading_time": 3, "published_at": "2024-03-05T09:00:00Z",
            "view_count": 12
        },
        {
            "id": 2, "slug": "css-grid", "title": "CSS Grid",
            "content": "Layouts.", "tags": "css, web", "published": true
        },
        {
            "id": 3, "slug": "draft", "title": "Unfinished tokio notes",
            "content": "tokio", "tags": ["rust"], "published": false
        },
    ]})
}

async fn serve_site(mock: &MockBackend) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let app = site::router(AppState::new(mock.config())?);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn public_blog_hides_drafts_and_searches_content() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("GET", endpoints::BLOG_POSTS, 200, posts());
    let blog = PublicBlogFetcher::new(mock.api(), 5);

    let all = blog.fetch(None, 1).await;
    assert_eq!(all.count, 2);

    let tokio = blog.fetch(Some("tokio"), 1).await;
    assert_eq!(tokio.count, 1);
    assert_eq!(tokio.items[0].slug, "async-rust");
    assert_eq!(tokio.items[0].reading_time, "3 min read");

    // An unbalanced pattern is matched literally
    assert_eq!(blog.fetch(Some("(rust"), 1).await.count, 0);
    Ok(())
}

#[tokio::test]
async fn tags_fall_back_to_published_posts() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("GET", endpoints::BLOG_POSTS, 200, posts());

    let tags = PublicBlogFetcher::new(mock.api(), 5).tags().await;
    assert_eq!(tags, vec!["async", "css", "rust", "web"]);
    Ok(())
}

#[tokio::test]
async fn tags_accept_counted_entries() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "GET",
        endpoints::BLOG_TAGS,
        200,
        json!({ "tags": [{ "name": "web", "count": 2 }, { "name": "rust", "count": 5 }] }),
    );

    let tags = PublicBlogFetcher::new(mock.api(), 5).tags().await;
    assert_eq!(tags, vec!["rust", "web"]);
    assert!(mock.requests_to("GET", endpoints::BLOG_POSTS).is_empty());
    Ok(())
}

#[tokio::test]
async fn import_sends_file_content_with_auth() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        endpoints::BLOG_IMPORT_MD,
        201,
        json!({
            "message": "Blog post imported successfully",
            "post": { "id": 5, "slug": "hello-world", "title": "Hello World" }
        }),
    );

    let admin = mock.admin("tok");
    let imported = admin
        .import_markdown(vec![UploadSource::new("hello.md", IMPORT.as_bytes().to_vec())])
        .await?;

    assert_eq!(imported.id, "5");
    assert_eq!(imported.slug, "hello-world");
    assert_eq!(imported.message, "Blog post imported successfully");

    let sent = mock.requests_to("POST", endpoints::BLOG_IMPORT_MD);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok"));
    assert_eq!(sent[0].json()["filename"], "hello.md");
    assert_eq!(sent[0].json()["content"], IMPORT);
    Ok(())
}

#[tokio::test]
async fn invalid_imports_are_rejected_locally() -> Result<()> {
    let mock = MockBackend::start().await?;
    let admin = mock.admin("tok");

    let wrong_type = admin
        .import_markdown(vec![UploadSource::new("hello.txt", IMPORT.as_bytes().to_vec())])
        .await;
    assert!(matches!(wrong_type, Err(ClientError::Validation(_))));

    let no_frontmatter = admin
        .import_markdown(vec![UploadSource::new("hello.md", b"# Just a heading".to_vec())])
        .await;
    assert!(matches!(no_frontmatter, Err(ClientError::Validation(_))));

    let untitled = admin
        .import_markdown(vec![UploadSource::new("hello.md", b"---\ntags: [a]\n---\nbody".to_vec())])
        .await;
    assert!(matches!(untitled, Err(ClientError::Validation(_))));

    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn import_errors_prefer_details() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        endpoints::BLOG_IMPORT_MD,
        409,
        json!({ "error": "Conflict", "details": "Post with slug 'hello-world' already exists" }),
    );

    let err = mock
        .admin("tok")
        .import_markdown(vec![UploadSource::new("hello.md", IMPORT.as_bytes().to_vec())])
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 409);
    assert_eq!(err.to_string(), "Post with slug 'hello-world' already exists");
    Ok(())
}

#[tokio::test]
async fn export_uses_content_disposition_name() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on_raw(
        "GET",
        "/api/v1/blog/export-md/async-rust",
        200,
        vec![
            ("content-type".to_string(), "text/markdown".to_string()),
            (
                "content-disposition".to_string(),
                "attachment; filename=\"async-rust.md\"".to_string(),
            ),
        ],
        "---\ntitle: Async Rust\n---\n\nbody\n".to_string(),
    );

    let (filename, content) = mock.admin("tok").export_markdown("async-rust").await?;
    assert_eq!(filename, "async-rust.md");
    assert!(content.starts_with("---\ntitle: Async Rust"));
    Ok(())
}

#[tokio::test]
async fn update_regenerates_slug_from_title() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("PUT", "/api/v1/blog/posts/1", 200, json!({ "message": "Post updated" }));

    let form = BlogEditForm {
        title: "Async Rust, Revisited".into(),
        content: "Futures again.".into(),
        tags: "rust, async".into(),
        published: true,
        ..BlogEditForm::default()
    };
    let update = mock.admin("tok").update_post("1", &form).await?;
    assert_eq!(update.slug, "async-rust-revisited");

    let sent = mock.requests_to("PUT", "/api/v1/blog/posts/1");
    assert_eq!(sent[0].json()["slug"], "async-rust-revisited");
    assert_eq!(sent[0].json()["tags"], json!(["rust", "async"]));
    assert_eq!(sent[0].json()["reading_time"], 1);
    Ok(())
}

#[tokio::test]
async fn site_renders_post_as_sanitized_html() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "GET",
        "/api/v1/blog/posts/async-rust",
        200,
        json!({ "post": {
            "id": 1, "slug": "async-rust", "title": "Async Rust",
            "content": "# Futures\n\nPolled by **tokio**.\n\n<script>alert(1)</script>",
            "published": true
        }}),
    );
    let site = serve_site(&mock).await?;

    let res = reqwest::get(format!("{}/blog/async-rust", site)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains("<h1>Futures</h1>"));
    assert!(html.contains("<strong>tokio</strong>"));
    assert!(!html.contains("<script>"));
    Ok(())
}

#[tokio::test]
async fn site_answers_404_for_missing_pages() -> Result<()> {
    let mock = MockBackend::start().await?;
    let site = serve_site(&mock).await?;

    let missing_post = reqwest::get(format!("{}/blog/nope", site)).await?;
    assert_eq!(missing_post.status(), StatusCode::NOT_FOUND);

    let unknown = reqwest::get(format!("{}/nowhere", site)).await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn site_blog_list_filters_by_query() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("GET", endpoints::BLOG_POSTS, 200, posts());
    let site = serve_site(&mock).await?;

    let html = reqwest::get(format!("{}/blog?q=grid", site)).await?.text().await?;
    assert!(html.contains("CSS Grid"));
    assert!(!html.contains("Async Rust"));
    assert!(!html.contains("Unfinished"));
    Ok(())
}

#[tokio::test]
async fn site_health_reports_backend() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("GET", endpoints::HEALTH, 200, json!({ "status": "ok" }));
    let site = serve_site(&mock).await?;

    let res = reqwest::get(format!("{}/health", site)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["backend"]["status"], "ok");
    Ok(())
}
