//! Form partials. Pages embed them pre-rendered and the mutation relay
//! patches them back in after a submission, either emptied (success) or
//! carrying the submitted values and field errors (failure).

use askama::Template;

use crate::application::forms::{
    CommentForm, ContactForm, NewsletterForm, PostForm, ReplyForm, SettingsForm,
};
use crate::application::mutation::MutationOutcome;
use crate::application::validation::FieldErrors;

/// Values and errors shown by a form partial.
#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    pub values: F,
    pub errors: FieldErrors,
}

impl<F: Default> FormState<F> {
    pub fn empty() -> Self {
        Self {
            values: F::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn with_values(values: F) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// State to show after `outcome`: reset on success, the submission and
    /// its field errors on failure.
    pub fn after(outcome: &MutationOutcome, submitted: F) -> Self {
        match outcome {
            Ok(_) => Self::empty(),
            Err(failure) => Self {
                values: submitted,
                errors: failure.field_errors().cloned().unwrap_or_default(),
            },
        }
    }

    /// First error for `field`, or empty when the field is valid.
    pub fn error(&self, field: &str) -> &str {
        self.errors.first(field).unwrap_or_default()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }
}

pub const NEWSLETTER_FORM_SELECTOR: &str = "#newsletter-form";
pub const CONTACT_FORM_SELECTOR: &str = "#contact-form";
pub const COMMENT_FORM_SELECTOR: &str = "#comment-form";
pub const POST_FORM_SELECTOR: &str = "#post-form";
pub const SETTINGS_FORM_SELECTOR: &str = "#settings-form";

#[derive(Template)]
#[template(path = "partials/forms/newsletter.html")]
pub struct NewsletterFormTemplate {
    pub form: FormState<NewsletterForm>,
}

#[derive(Template)]
#[template(path = "partials/forms/contact.html")]
pub struct ContactFormTemplate {
    pub form: FormState<ContactForm>,
}

#[derive(Template)]
#[template(path = "partials/forms/comment.html")]
pub struct CommentFormTemplate {
    pub action: String,
    pub enabled: bool,
    pub form: FormState<CommentForm>,
}

#[derive(Template)]
#[template(path = "partials/forms/reply.html")]
pub struct ReplyFormTemplate {
    pub comment_id: String,
    pub form: FormState<ReplyForm>,
}

impl ReplyFormTemplate {
    pub fn selector_for(comment_id: &str) -> String {
        format!("#reply-form-{comment_id}")
    }
}

#[derive(Template)]
#[template(path = "partials/forms/settings.html")]
pub struct SettingsFormTemplate {
    pub form: FormState<SettingsForm>,
}

impl SettingsFormTemplate {
    pub fn registrations_checked(&self) -> bool {
        crate::application::validation::parse_checkbox_flag(
            &self.form.values.allow_new_user_registrations,
        )
    }

    pub fn comments_checked(&self) -> bool {
        crate::application::validation::parse_checkbox_flag(
            &self.form.values.enable_comments_globally,
        )
    }
}

#[derive(Template)]
#[template(path = "partials/forms/post.html")]
pub struct PostFormTemplate {
    pub action: String,
    pub submit_label: &'static str,
    /// Image currently stored for the post being edited.
    pub existing_image_url: Option<String>,
    /// Markup produced by the configured content editor.
    pub editor_html: String,
    pub form: FormState<PostForm>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mutation::{MutationFailure, MutationSuccess};

    fn submitted() -> ContactForm {
        ContactForm {
            name: "A".into(),
            email: "reader@example.com".into(),
            message: "Hello there, friends".into(),
        }
    }

    #[test]
    fn success_resets_the_form() {
        let state = FormState::after(&Ok(MutationSuccess::new("sent")), submitted());
        assert_eq!(state.values, ContactForm::default());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn failure_keeps_values_and_errors() {
        let failure = MutationFailure::invalid(
            "Invalid form data.",
            FieldErrors::single("name", "Name must be at least 2 characters."),
        );
        let state = FormState::after(&Err(failure), submitted());
        assert_eq!(state.values.name, "A");
        assert_eq!(state.error("name"), "Name must be at least 2 characters.");
        assert_eq!(state.error("email"), "");
    }

    #[test]
    fn contact_partial_renders_errors_inline() {
        let failure = MutationFailure::invalid(
            "Invalid form data.",
            FieldErrors::single("name", "Name must be at least 2 characters."),
        );
        let html = ContactFormTemplate {
            form: FormState::after(&Err(failure), submitted()),
        }
        .render()
        .expect("render");
        assert!(html.contains("id=\"contact-form\""));
        assert!(html.contains("Name must be at least 2 characters."));
        assert!(html.contains("value=\"reader@example.com\""));
    }
}
