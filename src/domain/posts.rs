//! Post-level helpers shared by the listing, category and editor flows.

use crate::domain::entities::PostRecord;
use crate::domain::slug::derive_slug;

/// Split a comma-separated tag list, trimming entries and dropping empties.
/// Order is preserved; duplicates (case-insensitive) keep their first spelling.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for candidate in raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|seen| seen.eq_ignore_ascii_case(candidate)) {
            tags.push(candidate.to_string());
        }
    }
    tags
}

/// Stable filter key for a category name, falling back to the lowercased
/// name when it cannot be slugified.
pub fn category_key(name: &str) -> String {
    derive_slug(name).unwrap_or_else(|_| name.trim().to_lowercase())
}

impl PostRecord {
    pub fn category_key(&self) -> Option<String> {
        self.category.as_deref().map(category_key)
    }

    /// Case-insensitive substring match over title, excerpt, author and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&needle)
            || self.excerpt.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn post() -> PostRecord {
        PostRecord {
            id: Uuid::new_v4(),
            slug: "mastering-modern-design".into(),
            title: "Mastering Modern Design Principles".into(),
            author: "John Art".into(),
            excerpt: "Dive into the core principles of modern design.".into(),
            content_html: "<p>Body</p>".into(),
            category: Some("Design".into()),
            tags: vec!["ui/ux".into(), "minimalism".into()],
            image_url: None,
            image_hint: None,
            published_at: datetime!(2024-07-25 00:00 UTC),
            updated_at: datetime!(2024-07-25 00:00 UTC),
        }
    }

    #[test]
    fn split_tags_trims_and_drops_empties() {
        assert_eq!(
            split_tags(" ai , , innovation,AI,future tech "),
            vec!["ai", "innovation", "future tech"]
        );
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn query_matches_tags_and_title() {
        let post = post();
        assert!(post.matches_query("MINIMAL"));
        assert!(post.matches_query("modern design"));
        assert!(post.matches_query("  "));
        assert!(!post.matches_query("storytelling"));
    }

    #[test]
    fn category_key_is_slugified() {
        assert_eq!(post().category_key().as_deref(), Some("design"));
        assert_eq!(category_key("Personal Growth"), "personal-growth");
    }
}
