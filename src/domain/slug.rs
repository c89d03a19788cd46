//! Slug checks and derivation.
//!
//! Post slugs are typed by authors and must already be URL-safe; the check
//! here is the single definition of that shape. Category filter keys are
//! derived from free-form category names instead, bridging ASCII
//! slugification (`slug` crate) with Chinese transliteration (`pinyin`
//! crate) so a category such as “设计” becomes `she-ji`.

use pinyin::{Pinyin, ToPinyin};
use slug::slugify;
use thiserror::Error;

/// Errors that can occur while deriving a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Returns true when `value` is one or more runs of `[a-z0-9]` joined by
/// single hyphens, i.e. `^[a-z0-9]+(?:-[a-z0-9]+)*$`.
pub fn is_url_safe_slug(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    value.split('-').all(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
    })
}

/// Derive a slug from the provided human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let transliterated = transliterate_to_ascii(input);
    let candidate = slugify(&transliterated);

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

fn transliterate_to_ascii(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        if ch.is_ascii() {
            output.push(ch);
            continue;
        }

        match ch.to_pinyin() {
            Some(py) => append_pinyin(&mut output, py),
            None if ch.is_whitespace() => output.push(' '),
            None => {
                // Left in place; slugify drops what it cannot represent.
                output.push(ch);
            }
        }
    }

    output
}

fn append_pinyin(buffer: &mut String, pinyin: Pinyin) {
    if !buffer.is_empty() && !buffer.ends_with(' ') {
        buffer.push(' ');
    }
    buffer.push_str(pinyin.plain());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_hyphenated_slugs() {
        assert!(is_url_safe_slug("my-post-slug"));
        assert!(is_url_safe_slug("tech-innovations-2024"));
        assert!(is_url_safe_slug("a1"));
    }

    #[test]
    fn rejects_uppercase_spaces_and_symbols() {
        for candidate in [
            "My-Post",
            "my post",
            "My Post!",
            "my_post",
            "-leading",
            "trailing-",
            "double--hyphen",
            "",
            "caf\u{e9}",
        ] {
            assert!(
                !is_url_safe_slug(candidate),
                "`{candidate}` should be rejected"
            );
        }
    }

    #[test]
    fn derive_slug_handles_category_names() {
        assert_eq!(derive_slug("Personal Growth").expect("slug"), "personal-growth");
        assert_eq!(derive_slug("UI/UX Design").expect("slug"), "ui-ux-design");
    }

    #[test]
    fn derive_slug_transliterates_chinese() {
        let slug = derive_slug("Rust 基础教程").expect("slug");
        assert_eq!(slug, "rust-ji-chu-jiao-cheng");
    }

    #[test]
    fn derive_slug_rejects_blank_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }
}
