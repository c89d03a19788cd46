//! The validated-mutation cycle shared by every state-changing form.
//!
//! `MutationRunner::run` parses the raw form, and only when every field
//! passes does it log the intended change, wait out the configured latency
//! and hand the typed value to the write closure. The outcome is either a
//! [`MutationSuccess`] or a [`MutationFailure`]; both collapse into the
//! wire-level [`MutationResult`].

use std::{future::Future, time::Duration};

use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::validation::{FieldErrors, FormSchema};

pub const MUTATION_COUNTER: &str = "quire_mutation_total";

const CANCELLED_MESSAGE: &str = "Deletion cancelled. Nothing was changed.";

/// Structured result returned for every submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub message: Option<String>,
    pub is_error: bool,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_post_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_post_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    NewPostSlug(String),
    UpdatedPostSlug(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSuccess {
    pub message: String,
    pub follow_up: Option<FollowUp>,
    pub redirect_to: Option<String>,
    /// False when the request changed nothing (declined confirmation).
    pub applied: bool,
}

impl MutationSuccess {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            follow_up: None,
            redirect_to: None,
            applied: true,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            applied: false,
            ..Self::new(CANCELLED_MESSAGE)
        }
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.redirect_to = Some(location.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationFailure {
    /// At least one field failed its rules.
    #[error("{message}")]
    Invalid {
        message: String,
        errors: FieldErrors,
    },
    /// The store rejected the write because a unique field is taken.
    #[error("{message}")]
    Conflict {
        message: String,
        errors: FieldErrors,
    },
    #[error("{message}")]
    NotFound { message: String },
    /// The store failed; the submission may be retried by the user.
    #[error("{message}")]
    Failed { message: String },
}

impl MutationFailure {
    pub fn invalid(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self::Invalid {
            message: message.into(),
            errors,
        }
    }

    pub fn conflict(
        message: impl Into<String>,
        field: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            message: message.into(),
            errors: FieldErrors::single(field, detail),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid { errors, .. } | Self::Conflict { errors, .. } => Some(errors),
            Self::NotFound { .. } | Self::Failed { .. } => None,
        }
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "invalid",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Failed { .. } => "failed",
        }
    }
}

pub type MutationOutcome = Result<MutationSuccess, MutationFailure>;

impl From<MutationSuccess> for MutationResult {
    fn from(success: MutationSuccess) -> Self {
        let (new_post_slug, updated_post_slug) = match success.follow_up {
            Some(FollowUp::NewPostSlug(slug)) => (Some(slug), None),
            Some(FollowUp::UpdatedPostSlug(slug)) => (None, Some(slug)),
            None => (None, None),
        };
        Self {
            message: Some(success.message),
            is_error: false,
            errors: FieldErrors::new(),
            new_post_slug,
            updated_post_slug,
            redirect_to: success.redirect_to,
        }
    }
}

impl From<MutationFailure> for MutationResult {
    fn from(failure: MutationFailure) -> Self {
        let (message, errors) = match failure {
            MutationFailure::Invalid { message, errors }
            | MutationFailure::Conflict { message, errors } => (message, errors),
            MutationFailure::NotFound { message } | MutationFailure::Failed { message } => {
                (message, FieldErrors::new())
            }
        };
        Self {
            message: Some(message),
            is_error: true,
            errors,
            new_post_slug: None,
            updated_post_slug: None,
            redirect_to: None,
        }
    }
}

impl From<MutationOutcome> for MutationResult {
    fn from(outcome: MutationOutcome) -> Self {
        match outcome {
            Ok(success) => success.into(),
            Err(failure) => failure.into(),
        }
    }
}

/// Drives the parse → log → latency → write sequence.
#[derive(Debug, Clone)]
pub struct MutationRunner {
    latency: Duration,
}

impl MutationRunner {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Runner without artificial delay.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn run<F, W, Fut>(&self, action: &'static str, form: &F, write: W) -> MutationOutcome
    where
        F: FormSchema,
        W: FnOnce(F::Output) -> Fut,
        Fut: Future<Output = MutationOutcome>,
    {
        let value = match form.parse() {
            Ok(value) => value,
            Err(errors) => {
                let failure = MutationFailure::invalid(F::INVALID_MESSAGE, errors);
                self.record(action, &Err(failure.clone()));
                return Err(failure);
            }
        };

        info!(
            target = "quire::application::mutation",
            action,
            latency_ms = self.latency.as_millis() as u64,
            "Applying mutation"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let outcome = write(value).await;
        self.record(action, &outcome);
        outcome
    }

    /// Destructive variant: nothing runs unless the submission carried an
    /// explicit confirmation.
    pub async fn run_confirmed<F, W, Fut>(
        &self,
        action: &'static str,
        confirmed: bool,
        form: &F,
        write: W,
    ) -> MutationOutcome
    where
        F: FormSchema,
        W: FnOnce(F::Output) -> Fut,
        Fut: Future<Output = MutationOutcome>,
    {
        if !confirmed {
            let outcome = Ok(MutationSuccess::cancelled());
            self.record(action, &outcome);
            return outcome;
        }
        self.run(action, form, write).await
    }

    fn record(&self, action: &'static str, outcome: &MutationOutcome) {
        let label = match outcome {
            Ok(success) if success.applied => "success",
            Ok(_) => "cancelled",
            Err(failure) => failure.outcome_label(),
        };

        counter!(MUTATION_COUNTER, "action" => action, "outcome" => label).increment(1);

        match outcome {
            Ok(_) => info!(
                target = "quire::application::mutation",
                action,
                outcome = label,
                "Mutation finished"
            ),
            Err(failure) => warn!(
                target = "quire::application::mutation",
                action,
                outcome = label,
                error = %failure,
                "Mutation rejected"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::application::validation::Validator;

    struct NameForm(&'static str);

    impl FormSchema for NameForm {
        type Output = String;
        const INVALID_MESSAGE: &'static str = "Invalid form data.";

        fn parse(&self) -> Result<String, FieldErrors> {
            let mut validator = Validator::new();
            validator.min_chars("name", self.0, 2, "Name must be at least 2 characters.");
            validator.finish(self.0.trim().to_string())
        }
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_write() {
        let flag = AtomicBool::new(false);
        let called = &flag;
        let outcome = MutationRunner::immediate()
            .run("test.write", &NameForm("A"), move |_| async move {
                called.store(true, Ordering::SeqCst);
                Ok(MutationSuccess::new("written"))
            })
            .await;

        assert!(!called.load(Ordering::SeqCst));
        let failure = outcome.expect_err("validation fails");
        assert_eq!(failure.to_string(), "Invalid form data.");
        assert_eq!(
            failure.field_errors().and_then(|errors| errors.first("name")),
            Some("Name must be at least 2 characters.")
        );
    }

    #[tokio::test]
    async fn valid_input_is_passed_to_the_write() {
        let outcome = MutationRunner::immediate()
            .run("test.write", &NameForm("  Ada  "), |name| async move {
                Ok(MutationSuccess::new(format!("hello {name}")))
            })
            .await;

        assert_eq!(outcome.expect("success").message, "hello Ada");
    }

    #[tokio::test]
    async fn declined_confirmation_skips_everything() {
        let flag = AtomicBool::new(false);
        let called = &flag;
        let outcome = MutationRunner::immediate()
            .run_confirmed("test.delete", false, &NameForm("Ada"), move |_| async move {
                called.store(true, Ordering::SeqCst);
                Ok(MutationSuccess::new("deleted"))
            })
            .await
            .expect("cancel is not an error");

        assert!(!called.load(Ordering::SeqCst));
        assert!(!outcome.applied);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_awaited_before_writing() {
        let runner = MutationRunner::new(Duration::from_millis(750));
        let started = tokio::time::Instant::now();
        runner
            .run("test.write", &NameForm("Ada"), |_| async {
                Ok(MutationSuccess::new("ok"))
            })
            .await
            .expect("success");
        assert!(started.elapsed() >= Duration::from_millis(750));
    }

    #[test]
    fn result_serialization_omits_empty_parts() {
        let success = MutationResult::from(
            MutationSuccess::new("Saved.").with_follow_up(FollowUp::NewPostSlug("hello".into())),
        );
        let json = serde_json::to_value(&success).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Saved.",
                "isError": false,
                "newPostSlug": "hello"
            })
        );

        let failure = MutationResult::from(MutationFailure::conflict(
            "Invalid form data. Please check the fields below.",
            "slug",
            "A post with this slug already exists.",
        ));
        let json = serde_json::to_value(&failure).expect("json");
        assert_eq!(json["isError"], true);
        assert_eq!(
            json["errors"]["slug"][0],
            "A post with this slug already exists."
        );
    }
}
