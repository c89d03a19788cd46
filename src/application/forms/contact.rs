use serde::{Deserialize, Serialize};

use crate::application::validation::{FieldErrors, FormSchema, Validator};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormSchema for ContactForm {
    type Output = ContactSubmission;
    const INVALID_MESSAGE: &'static str = "Invalid form data.";

    fn parse(&self) -> Result<ContactSubmission, FieldErrors> {
        let mut validator = Validator::new();
        validator
            .min_chars("name", &self.name, 2, "Name must be at least 2 characters.")
            .email("email", &self.email, "Invalid email address.")
            .min_chars(
                "message",
                &self.message,
                10,
                "Message must be at least 10 characters.",
            );

        validator.finish(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_name_fails_only_on_name() {
        let form = ContactForm {
            name: "A".into(),
            email: "reader@example.com".into(),
            message: "I would love to hear more about this.".into(),
        };

        let errors = form.parse().expect_err("name too short");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(
            errors.get("name"),
            Some(&["Name must be at least 2 characters.".to_string()][..])
        );
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactForm::default().parse().expect_err("all empty");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["email", "message", "name"]
        );
    }

    #[test]
    fn valid_form_is_trimmed() {
        let form = ContactForm {
            name: "  Ada Lovelace ".into(),
            email: " ada@example.com ".into(),
            message: "A question about analytical engines.".into(),
        };
        let submission = form.parse().expect("valid");
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.email, "ada@example.com");
    }
}
