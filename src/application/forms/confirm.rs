use serde::{Deserialize, Serialize};

use crate::application::validation::{FieldErrors, FormSchema};

/// Payload of a destructive row action. The confirmation dialog submits
/// `confirm=yes`; anything else is treated as declined.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmForm {
    pub confirm: Option<String>,
}

impl ConfirmForm {
    pub fn confirmed() -> Self {
        Self {
            confirm: Some("yes".to_string()),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.confirm.as_deref().map(str::trim),
            Some("yes") | Some("on") | Some("true")
        )
    }
}

impl FormSchema for ConfirmForm {
    type Output = ();
    const INVALID_MESSAGE: &'static str = "Invalid request.";

    fn parse(&self) -> Result<(), FieldErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(ConfirmForm::confirmed().is_confirmed());
        assert!(!ConfirmForm::default().is_confirmed());
        assert!(
            !ConfirmForm {
                confirm: Some("no".into())
            }
            .is_confirmed()
        );
    }
}
