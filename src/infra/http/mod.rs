pub mod access;
mod admin;
mod middleware;
mod public;
mod relay;

pub use admin::{AdminState, build_admin_router};
pub use public::HttpState;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    middleware::from_fn,
};

use self::middleware::{log_responses, set_request_context};

const DATASTAR_REQUEST_HEADER: &str = "datastar-request";

/// Actor recorded in the audit log for admin writes.
pub const ADMIN_ACTOR: &str = "admin";
pub const VISITOR_ACTOR: &str = "visitor";

#[derive(Clone)]
pub struct RouterState {
    pub http: HttpState,
    pub admin: AdminState,
}

impl FromRef<RouterState> for HttpState {
    fn from_ref(state: &RouterState) -> Self {
        state.http.clone()
    }
}

impl FromRef<RouterState> for AdminState {
    fn from_ref(state: &RouterState) -> Self {
        state.admin.clone()
    }
}

/// The whole site: public pages, the `/admin` area and the 404 fallback.
/// `body_limit` caps form submissions, which may carry inline images.
pub fn build_router(state: RouterState, body_limit: usize) -> Router {
    public::public_routes()
        .nest("/admin", build_admin_router(state.admin.clone()))
        .fallback(public::fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(log_responses))
        .layer(from_fn(set_request_context))
}
