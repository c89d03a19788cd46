use serde::{Deserialize, Serialize};

use crate::application::forms::image::{
    FeaturedImage, ImageSource, is_valid_image_data_uri, resolve_featured_image,
};
use crate::application::validation::{
    FieldErrors, FormSchema, Validator, blank_to_none, visible_text_len,
};
use crate::domain::posts::split_tags;
use crate::domain::slug::is_url_safe_slug;

/// Create / edit post submission. `content` is the HTML mirrored into a
/// hidden field by the editor widget.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: String,
    pub tags: String,
    pub excerpt: String,
    pub image_url: String,
    pub image_data_uri: String,
    pub image_hint: String,
    pub image_source: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub image: FeaturedImage,
    pub image_hint: Option<String>,
    /// Sanitized HTML.
    pub content_html: String,
}

impl FormSchema for PostForm {
    type Output = PostDraft;
    const INVALID_MESSAGE: &'static str = "Invalid form data. Please check the fields below.";

    fn parse(&self) -> Result<PostDraft, FieldErrors> {
        let slug = self.slug.trim();
        let image_data_uri = self.image_data_uri.trim();
        let content_html = ammonia::clean(self.content.trim());

        let mut validator = Validator::new();
        validator
            .min_chars("title", &self.title, 3, "Title must be at least 3 characters.")
            .min_chars("slug", slug, 3, "Slug must be at least 3 characters.")
            .check(
                "slug",
                slug.is_empty() || is_url_safe_slug(slug),
                "Slug must be URL-friendly (e.g., my-post-slug).",
            )
            .min_chars(
                "author",
                &self.author,
                2,
                "Author name must be at least 2 characters.",
            )
            .min_chars(
                "excerpt",
                &self.excerpt,
                10,
                "Excerpt must be at least 10 characters.",
            )
            .optional_url(
                "imageUrl",
                &self.image_url,
                "Please enter a valid URL for the image.",
            )
            .check(
                "imageDataUri",
                image_data_uri.is_empty() || is_valid_image_data_uri(image_data_uri),
                "Uploaded image could not be read.",
            )
            .check(
                "content",
                visible_text_len(&content_html) >= 10,
                "Content must be at least 10 characters.",
            );

        let image = resolve_featured_image(
            ImageSource::parse(&self.image_source),
            image_data_uri,
            &self.image_url,
        );

        validator.finish(PostDraft {
            title: self.title.trim().to_string(),
            slug: slug.to_string(),
            author: self.author.trim().to_string(),
            category: blank_to_none(&self.category),
            tags: split_tags(&self.tags),
            excerpt: self.excerpt.trim().to_string(),
            image,
            image_hint: blank_to_none(&self.image_hint),
            content_html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PostForm {
        PostForm {
            title: "Hello World".into(),
            slug: "hello-world".into(),
            author: "Jane Doe".into(),
            category: "  ".into(),
            tags: "intro, , welcome ".into(),
            excerpt: "A first post to say hello.".into(),
            image_url: "https://placehold.co/600x400.png".into(),
            content: "<p>This is the very first post.</p>".into(),
            ..PostForm::default()
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        let draft = valid_form().parse().expect("valid");
        assert_eq!(draft.slug, "hello-world");
        assert_eq!(draft.category, None);
        assert_eq!(draft.tags, vec!["intro", "welcome"]);
        assert_eq!(
            draft.image,
            FeaturedImage::Replace("https://placehold.co/600x400.png".into())
        );
    }

    #[test]
    fn unfriendly_slug_gets_the_pattern_message() {
        let form = PostForm {
            slug: "My Post!".into(),
            ..valid_form()
        };
        let errors = form.parse().expect_err("bad slug");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["slug"]);
        assert_eq!(
            errors.first("slug"),
            Some("Slug must be URL-friendly (e.g., my-post-slug).")
        );
    }

    #[test]
    fn empty_slug_reports_length_only() {
        let form = PostForm {
            slug: String::new(),
            ..valid_form()
        };
        let errors = form.parse().expect_err("missing slug");
        assert_eq!(
            errors.get("slug"),
            Some(&["Slug must be at least 3 characters.".to_string()][..])
        );
    }

    #[test]
    fn markup_without_text_is_not_content() {
        let form = PostForm {
            content: "<p><br></p>".into(),
            ..valid_form()
        };
        let errors = form.parse().expect_err("empty body");
        assert_eq!(
            errors.first("content"),
            Some("Content must be at least 10 characters.")
        );
    }

    #[test]
    fn escaped_characters_count_as_one_each() {
        let form = PostForm {
            content: "&&&&".into(),
            ..valid_form()
        };
        let errors = form.parse().expect_err("four characters");
        assert_eq!(
            errors.first("content"),
            Some("Content must be at least 10 characters.")
        );
    }

    #[test]
    fn scripts_are_stripped_from_content() {
        let form = PostForm {
            content: "<p>Safe paragraph text</p><script>alert(1)</script>".into(),
            ..valid_form()
        };
        let draft = form.parse().expect("valid");
        assert!(!draft.content_html.contains("script"));
        assert!(draft.content_html.contains("Safe paragraph text"));
    }

    #[test]
    fn bad_image_inputs_are_field_errors() {
        let form = PostForm {
            image_url: "not a url".into(),
            image_data_uri: "data:image/png;base64,@@@".into(),
            ..valid_form()
        };
        let errors = form.parse().expect_err("bad image");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["imageDataUri", "imageUrl"]
        );
    }
}
