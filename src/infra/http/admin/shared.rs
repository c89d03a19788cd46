use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::error::HttpError;
use crate::application::mutation::MutationOutcome;
use crate::presentation::views::TemplateRenderError;

use crate::infra::http::relay::{Patch, stream_outcome};

/// Admin pages whose backing store could not be read.
pub(super) fn unavailable(source: &'static str, err: &dyn StdError) -> HttpError {
    HttpError::from_error(
        source,
        StatusCode::SERVICE_UNAVAILABLE,
        "Service temporarily unavailable",
        err,
    )
}

/// Stream `outcome` with the re-rendered list panel when the row action
/// changed something.
pub(super) fn stream_with_panel(
    outcome: MutationOutcome,
    panel: Option<Result<String, TemplateRenderError>>,
) -> Response {
    let mut patches = Vec::new();
    match panel {
        Some(Ok(html)) => patches.push(Patch::new(
            crate::presentation::admin::views::ADMIN_PANEL_SELECTOR,
            html,
        )),
        Some(Err(err)) => return HttpError::from(err).into_response(),
        None => {}
    }
    stream_outcome(outcome, patches)
}

/// Only re-render panels for deletes that actually ran.
pub(super) fn changed(outcome: &MutationOutcome) -> bool {
    matches!(outcome, Ok(success) if success.applied)
}
