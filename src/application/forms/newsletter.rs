use serde::{Deserialize, Serialize};

use crate::application::validation::{FieldErrors, FormSchema, Validator};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsletterForm {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterSignup {
    pub email: String,
}

impl FormSchema for NewsletterForm {
    type Output = NewsletterSignup;
    const INVALID_MESSAGE: &'static str = "Invalid email.";

    fn parse(&self) -> Result<NewsletterSignup, FieldErrors> {
        let mut validator = Validator::new();
        validator.email("email", &self.email, "Invalid email address.");
        validator.finish(NewsletterSignup {
            email: self.email.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_address() {
        let form = NewsletterForm {
            email: "not-an-email".into(),
        };
        let errors = form.parse().expect_err("invalid");
        assert_eq!(errors.first("email"), Some("Invalid email address."));
    }

    #[test]
    fn accepts_and_trims_address() {
        let form = NewsletterForm {
            email: " reader@example.com\n".into(),
        };
        assert_eq!(form.parse().expect("valid").email, "reader@example.com");
    }
}
