use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::upload::{UploadMode, UploadSource};

#[derive(Subcommand)]
pub enum UploadCommands {
    #[command(about = "Upload a file under a temporary name")]
    File {
        #[arg(help = "File to upload")]
        path: PathBuf,
    },

    #[command(about = "Upload a skill icon named after the skill")]
    Skill {
        #[arg(help = "Skill name")]
        name: String,
        #[arg(help = "Icon file")]
        path: PathBuf,
    },

    #[command(about = "Upload an image named after a project")]
    Project {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(help = "Image file")]
        path: PathBuf,
    },

    #[command(about = "Delete an uploaded file by URL")]
    Delete {
        #[arg(help = "Absolute URL under the backend's /uploads/")]
        url: String,
    },
}

pub async fn handle(cmd: UploadCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let (path, mode) = match cmd {
        UploadCommands::File { path } => (path, UploadMode::Generic),
        UploadCommands::Skill { name, path } => (path, UploadMode::Skill(name)),
        UploadCommands::Project { id, path } => (path, UploadMode::Project(id)),
        UploadCommands::Delete { url } => {
            if !ctx.api().is_local_upload(&url) {
                return Err(anyhow::anyhow!(
                    "'{}' is not under {}; only local uploads can be deleted",
                    url,
                    ctx.api().uploads_prefix()
                ));
            }
            ctx.require_admin("/admin").await?;
            if !ctx.admin.uploader().delete_uploaded_file(&url).await {
                return Err(anyhow::anyhow!("Failed to delete '{}'", url));
            }
            return output_success(&output_format, &format!("Deleted {}", url), Some(json!({ "url": url })));
        }
    };
    mode.validate()?;

    ctx.require_admin("/admin").await?;
    let uploader = ctx.admin.uploader();

    let source = UploadSource::from_path(&path).await?;
    let uploaded = uploader.select_and_upload(vec![source], &mode).await?;
    output_success(
        &output_format,
        &format!("Uploaded {} ({} bytes) to {}", uploaded.original_name, uploaded.size, uploaded.url),
        Some(json!({ "file": uploaded })),
    )
}
