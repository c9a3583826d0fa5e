use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::{loose_string, loose_u64, parse_optional_timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Draft,
    Live,
    Completed,
    Github,
    /// Anything else the backend stores, kept verbatim
    Other(String),
}

impl ProjectStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "draft" => ProjectStatus::Draft,
            "live" => ProjectStatus::Live,
            "completed" => ProjectStatus::Completed,
            "github" => ProjectStatus::Github,
            _ => ProjectStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::Live => "Live",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Github => "Github",
            ProjectStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTool {
    pub skill: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub status: ProjectStatus,
    pub tools: Vec<ProjectTool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub featured: bool,
}

/// Project as the backend sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireProject {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "img")]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tools: Value,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt", alias = "updated_at")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "loose_u64")]
    pub view_count: u64,
    #[serde(default)]
    pub featured: bool,
}

impl Project {
    pub fn from_wire(wire: WireProject) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            image: wire.image,
            link: wire.link,
            status: ProjectStatus::parse(&wire.status),
            tools: parse_tools(&wire.tools),
            created_at: parse_optional_timestamp(wire.created_at.as_deref()),
            updated_at: parse_optional_timestamp(wire.updated_at.as_deref()),
            view_count: wire.view_count,
            featured: wire.featured,
        }
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.skill.as_str()).collect()
    }
}

/// `tools` arrives either as an array or as a JSON-encoded string of one.
pub fn parse_tools(raw: &Value) -> Vec<ProjectTool> {
    match raw {
        Value::Array(_) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed project tools: {}", e);
            Vec::new()
        }),
        Value::String(s) if !s.trim().is_empty() => match serde_json::from_str::<Value>(s) {
            Ok(inner @ Value::Array(_)) => parse_tools(&inner),
            Ok(_) | Err(_) => {
                tracing::warn!("ignoring project tools string that is not a JSON array");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

/// Keeps the first tool for each skill name.
pub fn dedupe_tools(tools: Vec<ProjectTool>) -> Vec<ProjectTool> {
    let mut seen = HashSet::new();
    tools
        .into_iter()
        .filter(|tool| seen.insert(tool.skill.clone()))
        .collect()
}

/// Body of a project create/update
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub status: String,
    pub tools: Vec<ProjectTool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsEnvelope {
    #[serde(default)]
    pub projects: Vec<WireProject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectEnvelope {
    pub project: WireProject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tools_string_and_array_normalize_alike() {
        let array = json!([{"skill": "React", "icon": "/uploads/react.png"}]);
        let string = Value::String(array.to_string());
        assert_eq!(parse_tools(&array), parse_tools(&string));
        assert_eq!(parse_tools(&string)[0].skill, "React");
    }

    #[test]
    fn test_bad_tools_become_empty() {
        assert!(parse_tools(&Value::String("not json".into())).is_empty());
        assert!(parse_tools(&Value::Null).is_empty());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        assert_eq!(ProjectStatus::parse("live"), ProjectStatus::Live);
        assert_eq!(
            ProjectStatus::parse("In Progress"),
            ProjectStatus::Other("In Progress".into())
        );
        assert_eq!(ProjectStatus::parse("In Progress").to_string(), "In Progress");
    }

    #[test]
    fn test_from_wire_normalizes() {
        let wire: WireProject = serde_json::from_value(json!({
            "id": 7,
            "title": "404 Squad",
            "img": "http://localhost:8082/uploads/a.png",
            "status": "Github",
            "tools": "[{\"skill\":\"Go\",\"icon\":\"\"}]",
            "createdAt": "2024-01-02T03:04:05.000Z"
        }))
        .unwrap();
        let project = Project::from_wire(wire);
        assert_eq!(project.id, "7");
        assert_eq!(project.image, "http://localhost:8082/uploads/a.png");
        assert_eq!(project.status, ProjectStatus::Github);
        assert_eq!(project.tool_names(), vec!["Go"]);
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_dedupe_tools_keeps_first() {
        let tools = vec![
            ProjectTool { skill: "Rust".into(), icon: "a".into() },
            ProjectTool { skill: "Go".into(), icon: "b".into() },
            ProjectTool { skill: "Rust".into(), icon: "c".into() },
        ];
        let deduped = dedupe_tools(tools);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].icon, "a");
    }
}
