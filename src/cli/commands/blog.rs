use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::admin::BlogEditForm;
use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::content::{ContentFetcher, Listing, PublicBlogFetcher};
use crate::markdown::{extract_frontmatter, post_template, render_markdown, TEMPLATE_FILENAME};
use crate::models::BlogPost;
use crate::upload::UploadSource;

#[derive(Subcommand)]
pub enum BlogCommands {
    #[command(about = "List blog posts, filtered by title, content and tags")]
    List {
        #[arg(long, short, help = "Case-insensitive pattern")]
        query: Option<String>,
        #[arg(long, short, default_value_t = 1, help = "Page number")]
        page: usize,
        #[arg(long, help = "Include drafts (requires login)")]
        all: bool,
    },

    #[command(about = "Show a post by slug")]
    Show {
        #[arg(help = "Post slug")]
        slug: String,
        #[arg(long, help = "Print the content rendered as HTML")]
        html: bool,
    },

    #[command(about = "Edit a post; the slug is regenerated from the title")]
    Update {
        #[arg(help = "Current post slug")]
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, help = "Read new markdown content from this file")]
        content: Option<PathBuf>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long, help = "Comma-separated tags")]
        tags: Option<String>,
        #[arg(long, help = "Publish or unpublish")]
        published: Option<bool>,
        #[arg(long)]
        featured_image: Option<String>,
    },

    #[command(about = "Delete a post")]
    Delete {
        #[arg(help = "Post ID")]
        id: String,
    },

    #[command(about = "Import a markdown file with YAML frontmatter (start from 'folio blog template')")]
    Import {
        #[arg(help = "Markdown file (.md or .markdown)")]
        files: Vec<PathBuf>,
    },

    #[command(about = "Export a post as markdown")]
    Export {
        #[arg(help = "Post slug")]
        slug: String,
        #[arg(long, short, help = "Directory to write the file into (prints to stdout when omitted)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Write a starter markdown post for import")]
    Template {
        #[arg(long, short, help = "File or directory to write to (defaults to ./blog-post-template.md)")]
        out: Option<PathBuf>,
    },

    #[command(about = "Render a local markdown file to HTML")]
    Render {
        #[arg(help = "Markdown file")]
        file: PathBuf,
    },
}

fn print_post_row(post: &BlogPost) {
    println!(
        "{:<32} {:<36} {:<10} {:>6} {}",
        truncate(&post.slug, 32),
        truncate(&post.title, 36),
        if post.published { "published" } else { "draft" },
        post.view_count,
        post.display_date().unwrap_or_default()
    );
}

pub async fn handle(cmd: BlogCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let public = PublicBlogFetcher::new(ctx.api().clone(), ctx.config.content.page_size);

    match cmd {
        BlogCommands::List { query, page, all } => {
            let listing: Listing<BlogPost> = if all {
                ctx.require_admin("/admin/blog").await?;
                ctx.admin.list_posts(query.as_deref(), page).await
            } else {
                public.fetch(query.as_deref(), page).await
            };
            output_listing(&output_format, "posts", &listing, print_post_row)
        }
        BlogCommands::Show { slug, html } => {
            let post = public
                .by_slug(&slug)
                .await
                .ok_or_else(|| anyhow::anyhow!("Blog post '{}' not found", slug))?;
            output_with(&output_format, &post, || {
                println!("{}", post.title);
                println!(
                    "{} · {} · {} views",
                    post.display_date().unwrap_or_default(),
                    post.reading_time,
                    post.view_count
                );
                if !post.tags.is_empty() {
                    println!("Tags: {}", post.tags.join(", "));
                }
                println!();
                if html {
                    println!("{}", render_markdown(&post.content));
                } else {
                    println!("{}", post.content);
                }
            })
        }
        BlogCommands::Update {
            slug,
            title,
            content,
            excerpt,
            tags,
            published,
            featured_image,
        } => {
            ctx.require_admin(&format!("/admin/blog/{}", slug)).await?;

            let post = ctx.admin.load_post(&slug).await?;
            let mut form = BlogEditForm::from_post(&post);
            if let Some(v) = title {
                form.title = v;
            }
            if let Some(path) = content {
                form.content = tokio::fs::read_to_string(&path).await?;
            }
            if let Some(v) = excerpt {
                form.excerpt = v;
            }
            if let Some(v) = tags {
                form.tags = v;
            }
            if let Some(v) = published {
                form.published = v;
            }
            if let Some(v) = featured_image {
                form.featured_image = v;
            }

            let update = ctx.admin.update_post(&post.id, &form).await?;
            output_success(
                &output_format,
                &format!("Post '{}' updated (slug: {})", update.title, update.slug),
                Some(json!({ "id": post.id, "slug": update.slug, "reading_time": update.reading_time })),
            )
        }
        BlogCommands::Delete { id } => {
            ctx.require_admin("/admin/blog").await?;
            ctx.admin.delete_post(&id).await?;
            output_success(
                &output_format,
                &format!("Post '{}' deleted successfully", id),
                Some(json!({ "id": id })),
            )
        }
        BlogCommands::Import { files } => {
            ctx.require_admin("/admin/blog/import").await?;

            let mut sources = Vec::with_capacity(files.len());
            for path in &files {
                sources.push(UploadSource::from_path(path).await?);
            }
            let imported = ctx.admin.import_markdown(sources).await?;
            output_success(
                &output_format,
                &format!("{}: '{}' ({})", imported.message, imported.title, imported.slug),
                Some(json!({ "post": imported })),
            )
        }
        BlogCommands::Export { slug, output } => {
            ctx.require_admin(&format!("/admin/blog/{}", slug)).await?;

            let (filename, markdown) = ctx.admin.export_markdown(&slug).await?;
            match output {
                Some(dir) => {
                    let path = dir.join(&filename);
                    tokio::fs::write(&path, &markdown).await?;
                    output_success(
                        &output_format,
                        &format!("Exported '{}' to {}", slug, path.display()),
                        Some(json!({ "filename": filename, "path": path.display().to_string() })),
                    )
                }
                None => output_with(
                    &output_format,
                    &json!({ "filename": filename, "content": markdown }),
                    || print!("{}", markdown),
                ),
            }
        }
        BlogCommands::Template { out } => {
            let path = match out {
                Some(p) if p.is_dir() => p.join(TEMPLATE_FILENAME),
                Some(p) => p,
                None => PathBuf::from(TEMPLATE_FILENAME),
            };
            let template = post_template(chrono::Local::now().date_naive());
            tokio::fs::write(&path, &template).await?;
            output_success(
                &output_format,
                &format!("Template written to {}", path.display()),
                Some(json!({ "path": path.display().to_string() })),
            )
        }
        BlogCommands::Render { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let body = match extract_frontmatter(&raw) {
                Ok((_, body)) => body,
                Err(_) => raw,
            };
            let html = render_markdown(&body);
            output_with(&output_format, &json!({ "html": html }), || println!("{}", html))
        }
    }
}
