//! Markdown helpers shared by the blog admin and the public blog page.

pub mod frontmatter;
pub mod render;
pub mod slug;

pub use frontmatter::{extract_frontmatter, parse_document, post_template, Frontmatter, ParsedDocument, TEMPLATE_FILENAME};
pub use render::{export_filename, render_markdown};
pub use slug::{parse_tags, reading_time_label, reading_time_minutes, slugify};
