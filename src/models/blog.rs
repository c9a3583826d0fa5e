use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{loose_string, loose_strings, loose_u64, parse_optional_timestamp};

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub featured_image: String,
    pub reading_time: String,
    pub view_count: u64,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Blog post as the backend sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireBlogPost {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "loose_strings")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub reading_time: String,
    #[serde(default, deserialize_with = "loose_u64")]
    pub view_count: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl BlogPost {
    pub fn from_wire(wire: WireBlogPost) -> Self {
        // Bare minute counts from the edit form are shown like imported ones
        let reading_time = match wire.reading_time.trim().parse::<u64>() {
            Ok(minutes) => format!("{} min read", minutes.max(1)),
            Err(_) => wire.reading_time,
        };

        Self {
            id: wire.id,
            slug: wire.slug,
            title: wire.title,
            content: wire.content,
            excerpt: wire.excerpt,
            tags: wire.tags,
            published: wire.published,
            featured: wire.featured,
            featured_image: wire.featured_image,
            reading_time,
            view_count: wire.view_count,
            author: wire.author,
            published_at: parse_optional_timestamp(wire.published_at.as_deref()),
            created_at: parse_optional_timestamp(wire.created_at.as_deref()),
            updated_at: parse_optional_timestamp(wire.updated_at.as_deref()),
        }
    }

    /// Text the list filters match against
    pub fn search_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.content, self.tags.join(" "))
    }

    /// `published_at`, falling back to `created_at`, as "January 2, 2024"
    pub fn display_date(&self) -> Option<String> {
        self.published_at
            .or(self.created_at)
            .map(|dt| dt.format("%B %-d, %Y").to_string())
    }
}

/// Body of a blog post update
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlogPostUpdate {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured_image: String,
    /// Minutes, as the edit form computes it
    pub reading_time: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<WireBlogPost>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: WireBlogPost,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_wire_handles_loose_fields() {
        let wire: WireBlogPost = serde_json::from_value(json!({
            "id": "blog:hello",
            "slug": "hello",
            "title": "Hello",
            "tags": null,
            "reading_time": 3,
            "view_count": "12",
            "published_at": "2024-03-09T12:00:00Z",
            "created_at": "0001-01-01T00:00:00Z"
        }))
        .unwrap();
        let post = BlogPost::from_wire(wire);
        assert!(post.tags.is_empty());
        assert_eq!(post.reading_time, "3 min read");
        assert_eq!(post.view_count, 12);
        assert!(post.created_at.is_none());
        assert_eq!(post.display_date().as_deref(), Some("March 9, 2024"));
    }

    #[test]
    fn test_search_text_includes_tags() {
        let wire: WireBlogPost = serde_json::from_value(json!({
            "title": "Async", "content": "body", "tags": ["tokio", "rust"]
        }))
        .unwrap();
        assert!(BlogPost::from_wire(wire).search_text().contains("tokio rust"));
    }
}
