use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::admin::SkillForm;
use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::content::{ContentFetcher, SkillFetcher};
use crate::upload::UploadSource;

#[derive(Subcommand)]
pub enum SkillCommands {
    #[command(about = "List skills, filtered by name")]
    List {
        #[arg(long, short, help = "Case-insensitive pattern matched against skill names")]
        query: Option<String>,
        #[arg(long, short, default_value_t = 1, help = "Page number")]
        page: usize,
    },

    #[command(about = "List skill categories")]
    Categories,

    #[command(about = "Create a skill")]
    Create {
        #[arg(help = "Skill name")]
        skill: String,
        #[arg(long, help = "Category, e.g. Languages")]
        category: String,
        #[arg(long, help = "Icon file to upload", conflicts_with = "icon_url")]
        icon: Option<PathBuf>,
        #[arg(long, help = "Existing icon URL")]
        icon_url: Option<String>,
    },

    #[command(about = "Delete a skill")]
    Delete {
        #[arg(help = "Skill ID")]
        id: String,
    },
}

pub async fn handle(cmd: SkillCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let fetcher = SkillFetcher::new(ctx.api().clone(), ctx.config.content.page_size);

    match cmd {
        SkillCommands::List { query, page } => {
            let listing = fetcher.fetch(query.as_deref(), page).await;
            output_listing(&output_format, "skills", &listing, |s| {
                println!("{:<30} {:<24} {:<20} {}", truncate(&s.id, 30), s.skill, s.category, s.icon);
            })
        }
        SkillCommands::Categories => {
            let categories = fetcher.categories().await;
            if categories.is_empty() {
                return output_empty_collection(&output_format, "categories", "No categories found");
            }
            output_with(&output_format, &json!({ "categories": categories }), || {
                for category in &categories {
                    println!("{}", category);
                }
            })
        }
        SkillCommands::Create {
            skill,
            category,
            icon,
            icon_url,
        } => {
            ctx.require_admin("/admin/skills").await?;

            let icon_file = match icon {
                Some(path) => Some(UploadSource::from_path(&path).await?),
                None => None,
            };
            let created = ctx
                .admin
                .create_skill(SkillForm {
                    skill,
                    category,
                    icon_url,
                    icon_file,
                })
                .await?;
            output_success(
                &output_format,
                &format!("Skill '{}' created", created.skill),
                Some(json!({ "skill": created })),
            )
        }
        SkillCommands::Delete { id } => {
            ctx.require_admin("/admin/skills").await?;
            ctx.admin.delete_skill(&id).await?;
            output_success(
                &output_format,
                &format!("Skill '{}' deleted successfully", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
