use serde::{Deserialize, Serialize};

use crate::application::validation::{FieldErrors, FormSchema, Validator, parse_checkbox_flag};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsForm {
    pub site_name: String,
    pub site_description: String,
    pub footer_copyright_text: String,
    pub allow_new_user_registrations: Option<String>,
    pub enable_comments_globally: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub site_name: String,
    pub site_description: String,
    pub footer_copyright_text: String,
    pub allow_new_user_registrations: bool,
    pub enable_comments_globally: bool,
}

impl FormSchema for SettingsForm {
    type Output = SettingsDraft;
    const INVALID_MESSAGE: &'static str = "Invalid settings. Please check the fields below.";

    fn parse(&self) -> Result<SettingsDraft, FieldErrors> {
        let mut validator = Validator::new();
        validator
            .min_chars(
                "siteName",
                &self.site_name,
                3,
                "Site name must be at least 3 characters.",
            )
            .min_chars(
                "siteDescription",
                &self.site_description,
                10,
                "Site description must be at least 10 characters.",
            )
            .max_chars(
                "footerCopyrightText",
                &self.footer_copyright_text,
                200,
                "Footer text must be at most 200 characters.",
            );

        validator.finish(SettingsDraft {
            site_name: self.site_name.trim().to_string(),
            site_description: self.site_description.trim().to_string(),
            footer_copyright_text: self.footer_copyright_text.trim().to_string(),
            allow_new_user_registrations: parse_checkbox_flag(&self.allow_new_user_registrations),
            enable_comments_globally: parse_checkbox_flag(&self.enable_comments_globally),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_checkboxes_are_false() {
        let form = SettingsForm {
            site_name: "Quire".into(),
            site_description: "Notes on writing software.".into(),
            enable_comments_globally: Some("on".into()),
            ..SettingsForm::default()
        };
        let draft = form.parse().expect("valid");
        assert!(draft.enable_comments_globally);
        assert!(!draft.allow_new_user_registrations);
        assert_eq!(draft.footer_copyright_text, "");
    }

    #[test]
    fn long_footer_is_rejected() {
        let form = SettingsForm {
            site_name: "Quire".into(),
            site_description: "Notes on writing software.".into(),
            footer_copyright_text: "x".repeat(201),
            ..SettingsForm::default()
        };
        let errors = form.parse().expect_err("too long");
        assert_eq!(
            errors.first("footerCopyrightText"),
            Some("Footer text must be at most 200 characters.")
        );
    }
}
