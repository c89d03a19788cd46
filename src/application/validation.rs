//! Field-level validation shared by every form schema.
//!
//! A schema runs all of its rules through a [`Validator`]; nothing
//! short-circuits, so a submission reports every violated field at once.

use std::collections::BTreeMap;

use serde::Serialize;

/// Field name → ordered list of human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message for `field`; what the forms show beneath each input.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// A raw form that can be parsed into a typed, normalized value.
pub trait FormSchema {
    type Output;

    /// Generic message returned alongside field errors.
    const INVALID_MESSAGE: &'static str;

    fn parse(&self) -> Result<Self::Output, FieldErrors>;
}

/// Accumulates field errors across rules.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &'static str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(field, message);
        }
        self
    }

    /// At least `min` characters once surrounding whitespace is removed.
    pub fn min_chars(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        message: &str,
    ) -> &mut Self {
        self.check(field, value.trim().chars().count() >= min, message)
    }

    pub fn max_chars(
        &mut self,
        field: &'static str,
        value: &str,
        max: usize,
        message: &str,
    ) -> &mut Self {
        self.check(field, value.trim().chars().count() <= max, message)
    }

    pub fn email(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        self.check(field, is_valid_email(value.trim()), message)
    }

    /// Blank is accepted; anything else must be a well-formed address.
    pub fn optional_email(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        let value = value.trim();
        self.check(field, value.is_empty() || is_valid_email(value), message)
    }

    /// Blank is accepted; anything else must be an absolute http(s) URL.
    pub fn optional_url(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        let value = value.trim();
        self.check(field, value.is_empty() || is_valid_http_url(value), message)
    }

    pub fn finish<T>(self, output: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(output)
        } else {
            Err(self.errors)
        }
    }
}

/// Checkbox-like flags arrive as `"on"` (or `"true"`) when ticked and are
/// absent otherwise.
pub fn parse_checkbox_flag(input: &Option<String>) -> bool {
    matches!(input.as_deref().map(str::trim), Some("on") | Some("true"))
}

pub fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Pragmatic address check: one `@`, a non-empty local part without
/// whitespace, and a dotted domain whose labels are alphanumeric/hyphen and
/// whose final label is at least two letters.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.len() > 64
        || domain.contains('@')
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || local.chars().any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

pub fn is_valid_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

const MAX_REFERENCE_LEN: usize = 32;

/// Number of characters outside markup tags, ignoring surrounding whitespace.
/// A character reference such as `&amp;` counts as the one character it
/// names.
pub fn visible_text_len(html: &str) -> usize {
    let mut in_tag = false;
    let mut text = String::with_capacity(html.len());
    let mut chars = html.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '&' => match character_reference(&html[index..]) {
                Some((len, named)) => {
                    text.push(named);
                    // References are ASCII, one byte per char.
                    for _ in 1..len {
                        chars.next();
                    }
                }
                None => text.push('&'),
            },
            _ => text.push(ch),
        }
    }
    text.trim().chars().count()
}

/// Byte length of the reference opening `input` and a stand-in for the
/// character it names. Only non-breaking spaces matter as whitespace.
fn character_reference(input: &str) -> Option<(usize, char)> {
    let end = input
        .bytes()
        .take(MAX_REFERENCE_LEN)
        .position(|byte| byte == b';')?;
    let name = &input[1..end];
    if name.is_empty()
        || !name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'#')
    {
        return None;
    }

    let named = match name {
        "nbsp" | "#160" | "#xa0" | "#xA0" => ' ',
        _ => '\u{FFFD}',
    };
    Some((end + 1, named))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_collects_every_failing_field() {
        let mut validator = Validator::new();
        validator
            .min_chars("name", "A", 2, "Name must be at least 2 characters.")
            .email("email", "nope", "Invalid email address.")
            .min_chars("message", "long enough message", 10, "too short");

        let errors = validator.finish(()).expect_err("two fields fail");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "name"]);
        assert_eq!(
            errors.first("name"),
            Some("Name must be at least 2 characters.")
        );
        assert!(!errors.contains("message"));
    }

    #[test]
    fn min_chars_ignores_surrounding_whitespace() {
        let mut validator = Validator::new();
        validator.min_chars("title", "   ab   ", 3, "short");
        assert!(validator.finish(()).is_err());
    }

    #[test]
    fn email_shapes() {
        for good in [
            "reader@example.com",
            "first.last+news@mail.example.org",
            "fail@example.com",
        ] {
            assert!(is_valid_email(good), "{good} should pass");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@b",
            "a@@example.com",
            "a b@example.com",
            "a@exa_mple.com",
            "a@example.c",
            "a@-example.com",
            ".a@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should fail");
        }
    }

    #[test]
    fn optional_rules_accept_blank() {
        let mut validator = Validator::new();
        validator
            .optional_email("authorEmail", "  ", "bad email")
            .optional_url("imageUrl", "", "bad url");
        assert!(validator.finish(()).is_ok());
    }

    #[test]
    fn url_requires_http_scheme_and_host() {
        assert!(is_valid_http_url("https://placehold.co/600x400.png"));
        assert!(!is_valid_http_url("not a url"));
        assert!(!is_valid_http_url("ftp://example.com/image.png"));
        assert!(!is_valid_http_url("javascript:alert(1)"));
    }

    #[test]
    fn checkbox_flag_coercion() {
        assert!(parse_checkbox_flag(&Some("on".into())));
        assert!(parse_checkbox_flag(&Some("true".into())));
        assert!(!parse_checkbox_flag(&Some("off".into())));
        assert!(!parse_checkbox_flag(&None));
    }

    #[test]
    fn visible_text_skips_markup() {
        assert_eq!(visible_text_len("<p></p>"), 0);
        assert_eq!(visible_text_len("<p><strong>Hello</strong> world</p>"), 11);
    }

    #[test]
    fn character_references_count_once() {
        assert_eq!(visible_text_len("&amp;&amp;&amp;&amp;"), 4);
        assert_eq!(visible_text_len("<p>Fish &amp; chips</p>"), 12);
        assert_eq!(visible_text_len("<p>&#169; &lt;2024&gt;</p>"), 8);
        assert_eq!(visible_text_len("<p>&nbsp;&nbsp;</p>"), 0);
        assert_eq!(visible_text_len("a & b; c"), 8);
    }
}
