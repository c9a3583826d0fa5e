use chrono::Local;
use serde_json::Value;

use crate::api::endpoints;
use crate::cli::config::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::ChartPoint;

fn print_series(title: &str, series: &[ChartPoint]) {
    println!("{}", title);
    let peak = series.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    for point in series {
        let bar = "#".repeat(((point.value * 40) / peak) as usize);
        println!("  {} {}  {:>6} {}", point.day_name, point.date, point.value, bar);
    }
}

pub async fn handle(ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_admin("/admin").await?;

    let data = ctx.admin.load_dashboard(Local::now().date_naive()).await;
    output_with(&output_format, &data, || {
        println!("Site visits:   {}", data.visits);
        println!("Project views: {}", data.project_views);
        println!("Blog views:    {}", data.blog_views);
        println!(
            "Projects: {}  Skills: {}  Posts: {}",
            data.project_count, data.skill_count, data.post_count
        );
        println!();
        print_series("Visits, last 7 days", &data.visit_series);
        println!();
        print_series("Project views, last 7 days", &data.project_view_series);
    })
}

pub async fn health(ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let body: Value = ctx.api().get_json(endpoints::HEALTH).await?;
    output_with(&output_format, &body, || {
        println!(
            "{}: {}",
            ctx.api().base_url(),
            body.get("status").and_then(Value::as_str).unwrap_or("unknown")
        );
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            println!("{}", message);
        }
    })
}
