//! Backend paths the client depends on.

pub const AUTH_LOGIN: &str = "/api/v1/auth/login";
pub const AUTH_VERIFY: &str = "/api/v1/auth/verify";
pub const AUTH_LOGOUT: &str = "/api/v1/auth/logout";

pub const PROJECTS: &str = "/api/v1/projects";
pub const SKILLS: &str = "/api/v1/skills";
pub const SKILL_CATEGORIES: &str = "/api/v1/skills/categories";

pub const BLOG_POSTS: &str = "/api/v1/blog/posts";
pub const BLOG_ADMIN_POSTS: &str = "/api/v1/blog/admin/posts";
pub const BLOG_TAGS: &str = "/api/v1/blog/tags";
pub const BLOG_IMPORT_MD: &str = "/api/v1/blog/import-md";

pub const UPLOAD: &str = "/api/v1/upload";

pub const ANALYTICS_VISIT: &str = "/api/v1/analytics/visit";
pub const ANALYTICS_ALL: &str = "/api/v1/analytics/all";

pub const LEGACY_COUNTER: &str = "/api/counter";
pub const LEGACY_PROJECT_VIEWS: &str = "/api/projectviews";

pub const HEALTH: &str = "/health";

// Path segments for endpoints that carry a caller-supplied identifier; joined
// through `ApiClient::url_with_segments` so the identifier is percent-encoded.
pub fn project(id: &str) -> [&str; 4] {
    ["api", "v1", "projects", id]
}

pub fn project_views(id: &str) -> [&str; 5] {
    ["api", "v1", "projects", id, "views"]
}

pub fn skill(id: &str) -> [&str; 4] {
    ["api", "v1", "skills", id]
}

pub fn blog_post(slug_or_id: &str) -> [&str; 5] {
    ["api", "v1", "blog", "posts", slug_or_id]
}

pub fn blog_post_views(slug: &str) -> [&str; 6] {
    ["api", "v1", "blog", "posts", slug, "views"]
}

pub fn blog_export_md(slug: &str) -> [&str; 5] {
    ["api", "v1", "blog", "export-md", slug]
}

pub fn upload_skill(skill_name: &str) -> [&str; 5] {
    ["api", "v1", "upload", "skill", skill_name]
}

pub fn upload_project(project_id: &str) -> [&str; 5] {
    ["api", "v1", "upload", "project", project_id]
}

pub fn upload_rename(project_id: &str) -> [&str; 5] {
    ["api", "v1", "upload", "rename", project_id]
}

/// `filename` is taken verbatim from an upload URL and is already percent-encoded.
pub fn uploaded_file(filename: &str) -> String {
    format!("/api/v1/uploads/{filename}")
}
