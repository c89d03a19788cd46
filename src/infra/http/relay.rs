//! Turns a mutation outcome into a response.
//!
//! Plain clients get the [`MutationResult`] as JSON. Datastar clients get
//! an SSE stream: the re-rendered form and panels, a toast, and an
//! optional client-side navigation.

use std::time::Duration;

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::application::error::{ErrorReport, HttpError};
use crate::application::mutation::{MutationFailure, MutationOutcome, MutationResult};
use crate::application::stream::StreamBuilder;
use crate::presentation::views::{ToastItem, ToastStackTemplate, render_fragment};

use super::DATASTAR_REQUEST_HEADER;

pub(super) const TOAST_STACK_SELECTOR: &str = "#toast-stack";

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(5000);

pub(super) fn is_datastar(headers: &HeaderMap) -> bool {
    headers.contains_key(DATASTAR_REQUEST_HEADER)
}

pub(super) fn mutation_status(outcome: &MutationOutcome) -> StatusCode {
    match outcome {
        Ok(_) => StatusCode::OK,
        Err(MutationFailure::Invalid { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(MutationFailure::Conflict { .. }) => StatusCode::CONFLICT,
        Err(MutationFailure::NotFound { .. }) => StatusCode::NOT_FOUND,
        Err(MutationFailure::Failed { .. }) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub(super) fn json_result(outcome: MutationOutcome) -> Response {
    let status = mutation_status(&outcome);
    let report = outcome.as_ref().err().map(|failure| {
        ErrorReport::from_message("infra::http::relay::json_result", status, failure.to_string())
    });

    let mut response = (status, Json(MutationResult::from(outcome))).into_response();
    if let Some(report) = report {
        report.attach(&mut response);
    }
    response
}

/// An element replacement sent with the relay stream.
pub(super) struct Patch {
    selector: String,
    html: String,
}

impl Patch {
    pub(super) fn new(selector: impl Into<String>, html: String) -> Self {
        Self {
            selector: selector.into(),
            html,
        }
    }
}

#[derive(Clone, Copy)]
enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_variant(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

struct Toast {
    id: Uuid,
    kind: ToastKind,
    text: String,
    ttl: Duration,
}

impl Toast {
    fn for_result(result: &MutationResult) -> Option<Self> {
        let text = result.message.clone()?;
        let kind = if result.is_error {
            ToastKind::Error
        } else {
            ToastKind::Success
        };
        Some(Self {
            id: Uuid::new_v4(),
            kind,
            text,
            ttl: DEFAULT_TOAST_TTL,
        })
    }
}

fn push_toasts(stream: &mut StreamBuilder, toasts: &[Toast]) -> Result<(), HttpError> {
    let toasts = toasts
        .iter()
        .map(|toast| ToastItem {
            id: toast.id.to_string(),
            kind: toast.kind.as_variant(),
            title: toast.kind.title().to_string(),
            text: toast.text.clone(),
            ttl_ms: toast.ttl.as_millis() as u64,
        })
        .collect();

    let html = render_fragment(
        "infra::http::relay::push_toasts",
        &ToastStackTemplate { toasts },
    )?;
    stream.replace(TOAST_STACK_SELECTOR, html);
    Ok(())
}

/// Datastar response for `outcome`: `patches` first, then the toast, then
/// navigation when the outcome carries a target.
pub(super) fn stream_outcome(outcome: MutationOutcome, patches: Vec<Patch>) -> Response {
    let result = MutationResult::from(outcome);

    let mut stream = StreamBuilder::new();
    for patch in patches {
        stream.replace(&patch.selector, patch.html);
    }

    if let Some(toast) = Toast::for_result(&result)
        && let Err(err) = push_toasts(&mut stream, &[toast])
    {
        return err.into_response();
    }

    if let Some(target) = result.redirect_to.as_deref() {
        stream.navigate(target);
    }

    stream.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mutation::MutationSuccess;
    use crate::application::validation::FieldErrors;

    #[test]
    fn statuses_follow_the_outcome() {
        assert_eq!(
            mutation_status(&Ok(MutationSuccess::new("ok"))),
            StatusCode::OK
        );
        assert_eq!(
            mutation_status(&Err(MutationFailure::invalid("bad", FieldErrors::new()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            mutation_status(&Err(MutationFailure::conflict("bad", "slug", "taken"))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            mutation_status(&Err(MutationFailure::not_found("gone"))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            mutation_status(&Err(MutationFailure::failed("down"))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn datastar_header_is_detected() {
        let mut headers = HeaderMap::new();
        assert!(!is_datastar(&headers));
        headers.insert(DATASTAR_REQUEST_HEADER, "true".parse().expect("header"));
        assert!(is_datastar(&headers));
    }

    #[test]
    fn toasts_pick_their_kind() {
        let success = MutationResult::from(MutationSuccess::new("Saved."));
        let toast = Toast::for_result(&success).expect("toast");
        assert_eq!(toast.kind.as_variant(), "success");
        assert_eq!(toast.text, "Saved.");

        let failure = MutationResult::from(MutationFailure::failed("Nope."));
        assert_eq!(
            Toast::for_result(&failure).expect("toast").kind.as_variant(),
            "error"
        );
    }
}
