use std::fmt::Write;

use crate::content::Listing;
use crate::models::{BlogPost, Project, Skill};

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const NAV: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/works", "Works"),
    ("/blog", "Blog"),
    ("/contacts", "Contacts"),
];

fn layout(title: &str, body: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV {
        let _ = write!(nav, r#"<a href="{href}">{label}</a> "#);
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n<header><nav>{}</nav></header>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        nav.trim_end(),
        body
    )
}

fn project_card(project: &Project) -> String {
    let mut html = String::from("<article class=\"project\">");
    if !project.image.is_empty() {
        let _ = write!(
            html,
            r#"<img src="{}" alt="{}">"#,
            escape(&project.image),
            escape(&project.title)
        );
    }
    let _ = write!(
        html,
        "<h3>{}</h3><p>{}</p><span class=\"status\">{}</span>",
        escape(&project.title),
        escape(&project.description),
        escape(project.status.as_str())
    );
    if !project.tools.is_empty() {
        html.push_str("<ul class=\"tools\">");
        for tool in &project.tools {
            let _ = write!(html, "<li>{}</li>", escape(&tool.skill));
        }
        html.push_str("</ul>");
    }
    if !project.link.is_empty() {
        let _ = write!(html, r#"<a href="{}">Visit</a>"#, escape(&project.link));
    }
    html.push_str("</article>");
    html
}

fn skill_groups(groups: &[(String, Vec<Skill>)]) -> String {
    let mut html = String::new();
    for (category, skills) in groups {
        let _ = write!(html, "<section class=\"skills\"><h3>{}</h3><ul>", escape(category));
        for skill in skills {
            let _ = write!(
                html,
                r#"<li><img src="{}" alt="" width="24" height="24"> {}</li>"#,
                escape(&skill.icon),
                escape(&skill.skill)
            );
        }
        html.push_str("</ul></section>");
    }
    html
}

pub fn home_page(projects: &[Project], skills: &[(String, Vec<Skill>)]) -> String {
    let mut body = String::from("<h1>Portfolio</h1><h2>Latest works</h2>");
    if projects.is_empty() {
        body.push_str("<p>No projects yet.</p>");
    }
    for project in projects {
        body.push_str(&project_card(project));
    }
    body.push_str("<h2>Skills</h2>");
    body.push_str(&skill_groups(skills));
    layout("Portfolio", &body)
}

pub fn about_page(skills: &[(String, Vec<Skill>)]) -> String {
    let body = format!("<h1>About</h1><h2>What I work with</h2>{}", skill_groups(skills));
    layout("About", &body)
}

pub fn contacts_page() -> String {
    layout(
        "Contacts",
        "<h1>Contacts</h1><p>Get in touch through the links below.</p>",
    )
}

pub fn works_page(projects: &[Project]) -> String {
    let mut body = String::from("<h1>Works</h1>");
    if projects.is_empty() {
        body.push_str("<p>No projects yet.</p>");
    }
    for project in projects {
        body.push_str(&project_card(project));
    }
    layout("Works", &body)
}

fn page_link(query: &str, page: usize, label: &str) -> String {
    let mut href = format!("/blog?page={page}");
    if !query.is_empty() {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let _ = write!(href, "&q={encoded}");
    }
    format!(r#"<a href="{}">{}</a>"#, escape(&href), label)
}

pub fn blog_page(listing: &Listing<BlogPost>, query: &str, tags: &[String]) -> String {
    let mut body = format!(
        "<h1>Blog</h1><form action=\"/blog\"><input name=\"q\" value=\"{}\" placeholder=\"Search posts\"></form>",
        escape(query)
    );

    if !tags.is_empty() {
        body.push_str("<ul class=\"tags\">");
        for tag in tags {
            let _ = write!(body, "<li>{}</li>", escape(tag));
        }
        body.push_str("</ul>");
    }

    if listing.items.is_empty() {
        body.push_str("<p>No posts found.</p>");
    }
    for post in &listing.items {
        let _ = write!(
            body,
            "<article class=\"post\"><h2><a href=\"/blog/{}\">{}</a></h2><p class=\"meta\">{} · {}</p><p>{}</p></article>",
            escape(&post.slug),
            escape(&post.title),
            escape(&post.display_date().unwrap_or_default()),
            escape(&post.reading_time),
            escape(&post.excerpt)
        );
    }

    body.push_str("<nav class=\"pagination\">");
    if listing.has_prev() {
        body.push_str(&page_link(query, listing.page - 1, "Previous"));
    }
    if listing.has_next() {
        body.push_str(&page_link(query, listing.page + 1, "Next"));
    }
    body.push_str("</nav>");

    layout("Blog", &body)
}

/// `content_html` must already be sanitized.
pub fn post_page(post: &BlogPost, content_html: &str) -> String {
    let mut body = format!("<article><h1>{}</h1>", escape(&post.title));
    let _ = write!(
        body,
        "<p class=\"meta\">{} · {} · {} views</p>",
        escape(&post.display_date().unwrap_or_default()),
        escape(&post.reading_time),
        post.view_count
    );
    if !post.featured_image.is_empty() {
        let _ = write!(body, r#"<img src="{}" alt="">"#, escape(&post.featured_image));
    }
    body.push_str(content_html);
    if !post.tags.is_empty() {
        body.push_str("<ul class=\"tags\">");
        for tag in &post.tags {
            let _ = write!(body, "<li>{}</li>", escape(tag));
        }
        body.push_str("</ul>");
    }
    body.push_str("</article>");
    layout(&post.title, &body)
}

pub fn not_found_page() -> String {
    layout("Not found", "<h1>404</h1><p>This page could not be found.</p>")
}
