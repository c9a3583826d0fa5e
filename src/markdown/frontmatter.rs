use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slug::{reading_time_label, slugify};
use crate::error::{ClientError, ClientResult};

const EXCERPT_CHARS: usize = 150;
const NO_EXCERPT: &str = "No excerpt available";

pub const TEMPLATE_FILENAME: &str = "blog-post-template.md";

const TEMPLATE_BODY: &str = r#"# Your Blog Post Title

Write your blog post content here using Markdown syntax.

## Introduction

Start with an introduction that states what readers will learn from this post.

## Main Topic

Explain your main points with clear examples and code snippets.

- **Point 1**: Explanation here
- **Point 2**: More details

### Code Examples

```rust
fn main() {
    println!("Publishing: Your Blog Post Title");
}
```

### Images

![Example Image](https://via.placeholder.com/600x300?text=Your+Image+Here)

> **Tip**: Use descriptive alt text for accessibility and SEO.

## Conclusion

Summarize the key takeaways and suggest next steps for readers.

---

## Further Reading

- [Related Article](https://example.com)
- [Official Documentation](https://example.com)
"#;

/// YAML header of an importable markdown post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_time: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
}

/// A markdown post with its frontmatter validated and defaults filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub slug: String,
    pub excerpt: String,
    pub reading_time: String,
    pub body: String,
}

/// Splits `---` delimited frontmatter from the body; both are returned trimmed.
pub fn extract_frontmatter(content: &str) -> ClientResult<(String, String)> {
    let content = content.trim();
    if !content.starts_with("---") {
        return Err(ClientError::validation("Frontmatter must start with ---"));
    }

    let lines: Vec<&str> = content.lines().collect();
    let end = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i)
        .ok_or_else(|| ClientError::validation("Frontmatter must end with ---"))?;

    let frontmatter = lines[1..end].join("\n");
    let body = lines[end + 1..].join("\n");
    Ok((frontmatter.trim().to_string(), body.trim().to_string()))
}

pub fn parse_document(content: &str) -> ClientResult<ParsedDocument> {
    let (raw, body) = extract_frontmatter(content)?;

    let frontmatter: Frontmatter = if raw.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(&raw)
            .map_err(|e| ClientError::validation(format!("Frontmatter parsing failed: {e}")))?
    };

    if frontmatter.title.trim().is_empty() {
        return Err(ClientError::validation("Frontmatter title is required"));
    }

    let slug = non_blank(&frontmatter.slug).unwrap_or_else(|| slugify(&frontmatter.title));
    let excerpt = non_blank(&frontmatter.excerpt).unwrap_or_else(|| generate_excerpt(&body));
    let reading_time = non_blank(&frontmatter.reading_time).unwrap_or_else(|| reading_time_label(&body));

    Ok(ParsedDocument {
        frontmatter,
        slug,
        excerpt,
        reading_time,
        body,
    })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Starter post with every frontmatter field the importer reads.
pub fn post_template(today: NaiveDate) -> String {
    format!(
        "---\n\
         title: \"Your Blog Post Title\"\n\
         excerpt: \"Brief description of your blog post for SEO and previews\"\n\
         author: \"Your Name\"\n\
         publishedAt: \"{date}\"\n\
         tags: [\"rust\", \"web\", \"tutorial\"]\n\
         readingTime: \"5 min read\"\n\
         viewCount: 0\n\
         featured: false\n\
         slug: \"your-blog-post-slug\"\n\
         ---\n\n{body}\n**Last Updated**: {date}\n",
        date = today.format("%Y-%m-%d"),
        body = TEMPLATE_BODY,
    )
}

/// First non-heading line longer than ten characters
pub fn generate_excerpt(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| line.chars().count() > 10 && !line.starts_with('#'))
        .map(|line| {
            if line.chars().count() > EXCERPT_CHARS {
                format!("{}...", line.chars().take(EXCERPT_CHARS).collect::<String>())
            } else {
                line.to_string()
            }
        })
        .unwrap_or_else(|| NO_EXCERPT.to_string())
}
