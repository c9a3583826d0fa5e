use pulldown_cmark::{html, Event, Options, Parser};

/// Markdown to sanitized HTML with GFM tables, strikethrough and task lists.
/// Single newlines become `<br>`.
pub fn render_markdown(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut unsafe_html = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut unsafe_html, parser);

    ammonia::Builder::default()
        .add_tags(&["input"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .clean(&unsafe_html)
        .to_string()
}

/// Download name from a `Content-Disposition` header, else `{slug}.md`
pub fn export_filename(content_disposition: Option<&str>, slug: &str) -> String {
    content_disposition
        .and_then(|header| {
            let (_, rest) = header.split_once("filename=")?;
            let name = rest.split(';').next()?.trim().trim_matches('"').trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .unwrap_or_else(|| format!("{slug}.md"))
}
