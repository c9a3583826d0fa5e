pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use config::CliContext;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - admin command-line interface for the portfolio API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Portfolio API base URL (overrides PORTFOLIO_API_URL)")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Portfolio projects")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Skills and skill categories")]
    Skills {
        #[command(subcommand)]
        cmd: commands::skills::SkillCommands,
    },

    #[command(about = "Blog posts, markdown import and export")]
    Blog {
        #[command(subcommand)]
        cmd: commands::blog::BlogCommands,
    },

    #[command(about = "Upload and delete image files")]
    Upload {
        #[command(subcommand)]
        cmd: commands::upload::UploadCommands,
    },

    #[command(about = "Show analytics totals, weekly charts and content counts")]
    Dashboard,

    #[command(about = "Check backend health from the /health endpoint")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = CliContext::new(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &ctx, output_format).await,
        Commands::Skills { cmd } => commands::skills::handle(cmd, &ctx, output_format).await,
        Commands::Blog { cmd } => commands::blog::handle(cmd, &ctx, output_format).await,
        Commands::Upload { cmd } => commands::upload::handle(cmd, &ctx, output_format).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx, output_format).await,
        Commands::Health => commands::dashboard::health(&ctx, output_format).await,
    }
}
