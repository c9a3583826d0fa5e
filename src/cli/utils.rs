use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::content::Listing;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: [],
                "count": 0
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// JSON prints `value`; text runs `text`.
pub fn output_with<T, F>(output_format: &OutputFormat, value: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

/// Prints a page of results as `{collection: [...], count, page, ...}` or a text table.
pub fn output_listing<T, F>(
    output_format: &OutputFormat,
    collection_name: &str,
    listing: &Listing<T>,
    row: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T),
{
    if listing.count == 0 {
        return output_empty_collection(output_format, collection_name, &format!("No {} found", collection_name));
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: listing.items,
                "count": listing.count,
                "page": listing.page,
                "has_prev": listing.has_prev(),
                "has_next": listing.has_next(),
            }))?);
        }
        OutputFormat::Text => {
            for item in &listing.items {
                row(item);
            }
            println!("{}", "-".repeat(90));
            println!(
                "Page {} of {} ({} total){}{}",
                listing.page,
                listing.total_pages().max(1),
                listing.count,
                if listing.has_prev() { "  [prev]" } else { "" },
                if listing.has_next() { "  [next]" } else { "" },
            );
        }
    }
    Ok(())
}

/// Cuts `text` to `max` characters for table cells
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }
}
