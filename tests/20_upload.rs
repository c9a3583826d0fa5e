mod common;

use anyhow::Result;
use serde_json::json;

use common::MockBackend;
use portfolio_client::admin::projects::ProjectForm;
use portfolio_client::admin::skills::SkillForm;
use portfolio_client::api::endpoints;
use portfolio_client::auth::TokenStore;
use portfolio_client::cli::commands::upload::{handle, UploadCommands};
use portfolio_client::cli::config::CliContext;
use portfolio_client::cli::OutputFormat;
use portfolio_client::error::ClientError;
use portfolio_client::models::ProjectTool;
use portfolio_client::upload::{ImageField, UploadMode, UploadSource, Uploader};

fn png(name: &str) -> UploadSource {
    UploadSource::new(name, vec![0x89, b'P', b'N', b'G'])
}

#[tokio::test]
async fn generic_upload_returns_absolute_temporary_url() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        endpoints::UPLOAD,
        200,
        json!({ "filename": "1700000000_shot.png", "url": "/uploads/1700000000_shot.png", "size": 4 }),
    );

    let uploader = Uploader::new(mock.session(Some("tok")));
    let file = uploader.select_and_upload(vec![png("shot.png")], &UploadMode::Generic).await?;

    assert_eq!(file.url, mock.upload_url("1700000000_shot.png"));
    assert!(file.is_temporary);
    assert_eq!(file.original_name, "shot.png");
    assert_eq!(file.size, 4);

    let sent = mock.requests_to("POST", endpoints::UPLOAD);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok"));
    assert!(sent[0]
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert!(sent[0].body_text().contains("name=\"file\""));
    Ok(())
}

#[tokio::test]
async fn skill_upload_encodes_skill_name() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        "/api/v1/upload/skill/Node%20JS",
        200,
        json!({ "filename": "skill_Node_JS.svg", "url": "/uploads/skill_Node_JS.svg", "size": 4 }),
    );

    let uploader = Uploader::new(mock.session(Some("tok")));
    let file = uploader
        .select_and_upload(vec![png("node.svg")], &UploadMode::Skill("Node JS".into()))
        .await?;

    assert!(!file.is_temporary);
    assert_eq!(file.url, mock.upload_url("skill_Node_JS.svg"));
    Ok(())
}

#[tokio::test]
async fn file_count_is_validated_before_any_request() -> Result<()> {
    let mock = MockBackend::start().await?;
    let uploader = Uploader::new(mock.session(Some("tok")));

    let none = uploader.select_and_upload(Vec::new(), &UploadMode::Generic).await;
    assert!(matches!(none, Err(ClientError::Validation(_))));

    let two = uploader
        .select_and_upload(vec![png("a.png"), png("b.png")], &UploadMode::Generic)
        .await;
    assert!(matches!(two, Err(ClientError::Validation(_))));

    let blank_skill = uploader
        .select_and_upload(vec![png("a.png")], &UploadMode::Skill("  ".into()))
        .await;
    assert!(matches!(blank_skill, Err(ClientError::Validation(_))));

    assert!(mock.requests().is_empty());
    Ok(())
}

fn project_form(image_url: &str) -> ProjectForm {
    ProjectForm {
        title: "Folio".into(),
        description: "Portfolio site".into(),
        status: "live".into(),
        tools: vec![ProjectTool {
            skill: "Rust".into(),
            icon: String::new(),
        }],
        image: ImageField::with_original(image_url),
        ..ProjectForm::default()
    }
}

#[tokio::test]
async fn created_project_gets_temporary_image_renamed() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        endpoints::UPLOAD,
        200,
        json!({ "filename": "1700_cover.png", "url": "/uploads/1700_cover.png", "size": 4 }),
    );
    mock.on(
        "POST",
        endpoints::PROJECTS,
        201,
        json!({ "project": { "id": "p1", "title": "Folio", "description": "Portfolio site",
                             "image": mock.upload_url("1700_cover.png"), "status": "live" } }),
    );
    mock.on(
        "POST",
        "/api/v1/upload/rename/p1",
        200,
        json!({ "newImageUrl": "/uploads/project_p1.png" }),
    );

    let admin = mock.admin("tok");
    let upload = admin
        .uploader()
        .select_and_upload(vec![png("cover.png")], &UploadMode::Generic)
        .await?;

    let mut form = project_form("");
    form.attach_upload(upload.clone());
    let project = admin.create_project(form).await?;

    assert_eq!(project.id, "p1");
    assert_eq!(project.image, mock.upload_url("project_p1.png"));

    let rename = mock.requests_to("POST", "/api/v1/upload/rename/p1");
    assert_eq!(rename.len(), 1);
    assert_eq!(rename[0].json()["oldImageUrl"], json!(upload.url));
    Ok(())
}

#[tokio::test]
async fn failed_rename_keeps_temporary_url() -> Result<()> {
    let mock = MockBackend::start().await?;
    let temp_url = mock.upload_url("1700_cover.png");
    mock.on(
        "POST",
        endpoints::PROJECTS,
        201,
        json!({ "project": { "id": "p2", "title": "Folio", "image": temp_url, "status": "live" } }),
    );
    mock.on("POST", "/api/v1/upload/rename/p2", 500, json!({ "error": "disk full" }));

    let admin = mock.admin("tok");
    let mut form = project_form("");
    form.attach_upload(portfolio_client::models::UploadedFile {
        filename: "1700_cover.png".into(),
        url: temp_url.clone(),
        size: 4,
        is_temporary: true,
        original_name: "cover.png".into(),
    });

    let project = admin.create_project(form).await?;
    assert_eq!(project.image, temp_url);
    Ok(())
}

#[tokio::test]
async fn missing_required_project_fields_fail_locally() -> Result<()> {
    let mock = MockBackend::start().await?;
    let admin = mock.admin("tok");

    let err = admin.create_project(project_form("")).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn removed_local_image_is_deleted_on_commit() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on("DELETE", "/api/v1/uploads/old%20shot.png", 200, json!({ "message": "deleted" }));

    let uploader = Uploader::new(mock.session(Some("tok")));
    let mut field = ImageField::with_original(mock.upload_url("old%20shot.png"));
    field.remove();
    assert!(field.pending_removal().is_some());

    assert!(field.commit(&uploader).await);
    let deletes = mock.requests_to("DELETE", "/api/v1/uploads/old%20shot.png");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].authorization.as_deref(), Some("Bearer tok"));
    Ok(())
}

fn editing_form(image: &str) -> ProjectForm {
    ProjectForm {
        title: "Folio".into(),
        description: "Portfolio site".into(),
        status: "live".into(),
        image: ImageField::with_original(image),
        ..ProjectForm::default()
    }
}

#[tokio::test]
async fn project_update_deletes_removed_image_after_save() -> Result<()> {
    let mock = MockBackend::start().await?;
    let old = mock.upload_url("old.png");
    mock.on(
        "PUT",
        "/api/v1/projects/p1",
        200,
        json!({ "project": { "id": "p1", "title": "Folio", "image": "", "status": "live" } }),
    );
    mock.on("DELETE", "/api/v1/uploads/old.png", 200, json!({ "message": "deleted" }));

    let admin = mock.admin("tok");
    let mut form = editing_form(&old);
    form.image.remove();

    let project = admin.update_project("p1", &mut form).await?;
    assert_eq!(project.image, "");

    let puts = mock.requests_to("PUT", "/api/v1/projects/p1");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].json()["image"], json!(""));
    assert_eq!(mock.requests_to("DELETE", "/api/v1/uploads/old.png").len(), 1);

    let methods: Vec<String> = mock.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["PUT".to_string(), "DELETE".to_string()]);
    assert!(form.image.pending_removal().is_none());
    Ok(())
}

#[tokio::test]
async fn failed_project_update_keeps_removed_image() -> Result<()> {
    let mock = MockBackend::start().await?;
    let old = mock.upload_url("old.png");
    mock.on("PUT", "/api/v1/projects/p1", 500, json!({ "error": "database unavailable" }));

    let admin = mock.admin("tok");
    let mut form = editing_form(&old);
    form.image.remove();

    let err = admin.update_project("p1", &mut form).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert!(mock.requests_to("DELETE", "/api/v1/uploads/old.png").is_empty());
    assert_eq!(form.image.pending_removal(), Some(old.as_str()));
    Ok(())
}

#[tokio::test]
async fn cancelled_or_external_removals_issue_no_delete() -> Result<()> {
    let mock = MockBackend::start().await?;
    let uploader = Uploader::new(mock.session(Some("tok")));

    let mut external = ImageField::with_original("https://cdn.example.com/cover.png");
    external.remove();
    assert!(!external.commit(&uploader).await);

    let mut replaced = ImageField::with_original(mock.upload_url("old.png"));
    replaced.remove();
    replaced.set_url(mock.upload_url("new.png"));
    assert!(replaced.pending_removal().is_none());
    assert!(!replaced.commit(&uploader).await);

    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn skill_with_icon_file_uploads_then_creates() -> Result<()> {
    let mock = MockBackend::start().await?;
    mock.on(
        "POST",
        "/api/v1/upload/skill/Rust",
        200,
        json!({ "filename": "skill_Rust.svg", "url": "/uploads/skill_Rust.svg", "size": 4 }),
    );
    mock.on(
        "POST",
        endpoints::SKILLS,
        201,
        json!({ "skill": { "id": "s1", "skill": "Rust", "icon": mock.upload_url("skill_Rust.svg"), "category": "Languages" } }),
    );

    let admin = mock.admin("tok");
    let skill = admin
        .create_skill(SkillForm {
            skill: "Rust".into(),
            category: "Languages".into(),
            icon_url: None,
            icon_file: Some(png("rust.svg")),
        })
        .await?;

    assert_eq!(skill.id, "s1");
    let created = mock.requests_to("POST", endpoints::SKILLS);
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].json()["icon"], json!(mock.upload_url("skill_Rust.svg")));
    Ok(())
}

#[tokio::test]
async fn cli_blank_skill_upload_fails_before_session_check() -> Result<()> {
    let mock = MockBackend::start().await?;
    let dir = std::env::temp_dir().join(format!("portfolio-cli-upload-{}", mock.port));
    let ctx = CliContext::from_parts(mock.config(), &dir)?;
    ctx.token_store.save("tok")?;

    let cmd = UploadCommands::Skill {
        name: "  ".into(),
        path: dir.join("icon.svg"),
    };
    let err = handle(cmd, &ctx, OutputFormat::Json).await.unwrap_err();

    assert!(err.to_string().contains("skill name"));
    assert!(mock.requests().is_empty());
    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
