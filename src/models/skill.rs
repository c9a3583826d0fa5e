use serde::{Deserialize, Serialize};

use super::loose_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
}

/// Body of a skill create
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillInput {
    pub skill: String,
    pub category: String,
    pub icon: String,
}

/// Distinct non-empty categories in first-seen order
pub fn categories_of(skills: &[Skill]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for skill in skills {
        let category = skill.category.trim();
        if !category.is_empty() && !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// Skills grouped under their category, in category first-seen order.
/// Members are sorted by name.
pub fn group_by_category(skills: &[Skill]) -> Vec<(String, Vec<Skill>)> {
    categories_of(skills)
        .into_iter()
        .map(|category| {
            let mut members: Vec<Skill> = skills
                .iter()
                .filter(|s| s.category.trim() == category)
                .cloned()
                .collect();
            members.sort_by_key(|s| s.skill.to_lowercase());
            (category, members)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillsEnvelope {
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, category: &str) -> Skill {
        Skill {
            id: name.to_lowercase(),
            skill: name.to_string(),
            icon: String::new(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_categories_first_seen_and_distinct() {
        let skills = vec![
            skill("Rust", "Languages"),
            skill("Axum", "Frameworks"),
            skill("Go", "Languages"),
            skill("Misc", " "),
        ];
        assert_eq!(categories_of(&skills), vec!["Languages", "Frameworks"]);
        let groups = group_by_category(&skills);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_group_members_sorted_by_name() {
        let skills = vec![
            skill("TypeScript", "Languages"),
            skill("go", "Languages"),
            skill("Rust", "Languages"),
        ];
        let groups = group_by_category(&skills);
        let names: Vec<&str> = groups[0].1.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["go", "Rust", "TypeScript"]);
    }
}
