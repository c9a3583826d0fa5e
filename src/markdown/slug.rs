const WORDS_PER_MINUTE: usize = 200;

/// URL slug for a title: "Hello, World!" becomes "hello-world".
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Comma-separated tags, trimmed, blanks dropped
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes for the edit form, rounded up
pub fn reading_time_minutes(content: &str) -> u64 {
    word_count(content).div_ceil(WORDS_PER_MINUTE) as u64
}

/// "N min read" with whole minutes rounded down, never below one
pub fn reading_time_label(content: &str) -> String {
    let minutes = (word_count(content) / WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Modern CSS   Techniques "), "modern-css-techniques");
        assert_eq!(slugify("Rust -- and -- Go"), "rust-and-go");
        assert_eq!(slugify("Çok güzel"), "ok-gzel");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Building a CMS in 2024";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(title), "building-a-cms-in-2024");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_reading_time() {
        let words = "word ".repeat(401);
        assert_eq!(reading_time_minutes(&words), 3);
        assert_eq!(reading_time_label(&words), "2 min read");
        assert_eq!(reading_time_label("short"), "1 min read");
        assert_eq!(reading_time_minutes(""), 0);
    }
}
