//! Helpers for building server-driven datastar SSE responses.

use std::convert::Infallible;

use async_stream::stream;
use axum::response::{
    IntoResponse, Response,
    sse::{Event, Sse},
};
use datastar::prelude::{ElementPatchMode, ExecuteScript, PatchElements};

/// Ordered list of datastar events sent back for one request.
#[derive(Default)]
pub struct StreamBuilder {
    events: Vec<Event>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the element matching `selector` with `html`.
    pub fn replace(&mut self, selector: &str, html: String) -> &mut Self {
        let event = PatchElements::new(html)
            .selector(selector)
            .mode(ElementPatchMode::Replace)
            .write_as_axum_sse_event();
        self.events.push(event);
        self
    }

    pub fn script(&mut self, script: String) -> &mut Self {
        self.events
            .push(ExecuteScript::new(script).write_as_axum_sse_event());
        self
    }

    /// Client-side navigation to a same-origin path.
    pub fn navigate(&mut self, location: &str) -> &mut Self {
        let target = serde_json::to_string(location).unwrap_or_else(|_| "\"/\"".to_string());
        self.script(format!("window.location.assign({target});"))
    }

    pub fn into_response(self) -> Response {
        let events = self.events;
        let body = stream! {
            for event in events {
                yield Ok::<Event, Infallible>(event);
            }
        };
        Sse::new(body).into_response()
    }
}
