use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::admin::ProjectForm;
use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::content::{ContentFetcher, ProjectFetcher};
use crate::models::{Project, ProjectTool, Skill};
use crate::upload::{UploadMode, UploadSource};

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects, filtered by title")]
    List {
        #[arg(long, short, help = "Case-insensitive pattern matched against titles")]
        query: Option<String>,
        #[arg(long, short, default_value_t = 1, help = "Page number")]
        page: usize,
    },

    #[command(about = "Show one project")]
    Show {
        #[arg(help = "Project ID")]
        id: String,
    },

    #[command(about = "Create a project")]
    Create {
        #[arg(help = "Project title")]
        title: String,
        #[arg(long, help = "Project description")]
        description: String,
        #[arg(long, help = "Status: Draft, Live, Completed or Github")]
        status: String,
        #[arg(long, default_value = "", help = "Live or repository URL")]
        link: String,
        #[arg(long, help = "Image file to upload", conflicts_with = "image_url")]
        image: Option<PathBuf>,
        #[arg(long, help = "Existing image URL")]
        image_url: Option<String>,
        #[arg(long = "tool", help = "Skill name used by the project (repeatable)")]
        tools: Vec<String>,
    },

    #[command(about = "Update a project")]
    Update {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long, help = "Replace the image with this file", conflicts_with = "remove_image")]
        image: Option<PathBuf>,
        #[arg(long, help = "Delete the current image when saving")]
        remove_image: bool,
        #[arg(long = "tool", help = "Replace the tool list (repeatable)")]
        tools: Vec<String>,
    },

    #[command(about = "Delete a project")]
    Delete {
        #[arg(help = "Project ID")]
        id: String,
    },
}

fn print_project(project: &Project) {
    println!("Project: {} ({})", project.title, project.id);
    println!("Status: {}", project.status);
    if !project.link.is_empty() {
        println!("Link: {}", project.link);
    }
    println!("Image: {}", project.image);
    if !project.tools.is_empty() {
        println!("Tools: {}", project.tool_names().join(", "));
    }
    if let Some(created) = project.created_at {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("Views: {}", project.view_count);
    println!();
    println!("{}", project.description);
}

/// Tool entries for the named skills, with icons taken from the skill list
fn resolve_tools(names: &[String], skills: &[Skill]) -> Vec<ProjectTool> {
    names
        .iter()
        .map(|name| {
            let icon = skills
                .iter()
                .find(|s| s.skill.eq_ignore_ascii_case(name))
                .map(|s| s.icon.clone())
                .unwrap_or_default();
            if icon.is_empty() {
                tracing::warn!("no skill named '{}' found; adding tool without an icon", name);
            }
            ProjectTool {
                skill: name.clone(),
                icon,
            }
        })
        .collect()
}

pub async fn handle(cmd: ProjectCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let fetcher = ProjectFetcher::new(ctx.api().clone(), ctx.config.content.page_size);

    match cmd {
        ProjectCommands::List { query, page } => {
            let listing = fetcher.fetch(query.as_deref(), page).await;
            output_listing(&output_format, "projects", &listing, |p| {
                println!(
                    "{:<26} {:<30} {:<10} {}",
                    truncate(&p.id, 26),
                    truncate(&p.title, 30),
                    p.status,
                    p.tool_names().join(", ")
                );
            })
        }
        ProjectCommands::Show { id } => {
            let project = fetcher
                .by_id(&id)
                .await
                .ok_or_else(|| anyhow::anyhow!("Project '{}' not found", id))?;
            output_with(&output_format, &project, || print_project(&project))
        }
        ProjectCommands::Create {
            title,
            description,
            status,
            link,
            image,
            image_url,
            tools,
        } => {
            ctx.require_admin("/admin/projects/new").await?;

            let skills = ctx.admin.skills().sorted().await;
            let mut form = ProjectForm {
                title,
                description,
                link,
                status,
                tools: resolve_tools(&tools, &skills),
                ..ProjectForm::default()
            };

            if let Some(path) = image {
                let source = UploadSource::from_path(&path).await?;
                let uploaded = ctx
                    .admin
                    .uploader()
                    .select_and_upload(vec![source], &UploadMode::Generic)
                    .await?;
                form.attach_upload(uploaded);
            } else if let Some(url) = image_url {
                form.image.set_url(url);
            }

            let project = ctx.admin.create_project(form).await?;
            output_success(
                &output_format,
                &format!("Project '{}' created with ID {}", project.title, project.id),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Update {
            id,
            title,
            description,
            status,
            link,
            image,
            remove_image,
            tools,
        } => {
            ctx.require_admin(&format!("/admin/projects/{}", id)).await?;

            let mut editor = ctx.admin.load_project_editor(&id).await?;
            let form = &mut editor.form;
            if let Some(v) = title {
                form.title = v;
            }
            if let Some(v) = description {
                form.description = v;
            }
            if let Some(v) = status {
                form.status = v;
            }
            if let Some(v) = link {
                form.link = v;
            }
            if !tools.is_empty() {
                form.tools = resolve_tools(&tools, &editor.skills);
            }

            if remove_image {
                form.image.remove();
            }
            if let Some(path) = image {
                form.image.remove();
                let source = UploadSource::from_path(&path).await?;
                let uploaded = ctx
                    .admin
                    .uploader()
                    .select_and_upload(vec![source], &UploadMode::Project(id.clone()))
                    .await?;
                form.attach_upload(uploaded);
            }

            let project = ctx.admin.update_project(&id, form).await?;
            output_success(
                &output_format,
                &format!("Project '{}' updated", project.title),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Delete { id } => {
            ctx.require_admin("/admin/projects").await?;
            ctx.admin.delete_project(&id).await?;
            output_success(
                &output_format,
                &format!("Project '{}' deleted successfully", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
