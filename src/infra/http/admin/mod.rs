mod categories;
mod comments;
mod dashboard;
mod posts;
mod settings;
mod shared;
mod state;
mod subscribers;
mod transfer;

pub use state::AdminState;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::access::require_admin_access;

/// Admin routes, relative to the `/admin` mount point and gated by the
/// configured access policy.
pub fn build_admin_router<S>(state: AdminState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let access = state.access.clone();
    Router::new()
        .route("/", get(dashboard::admin_root))
        .route("/dashboard", get(dashboard::admin_dashboard))
        .route("/posts", get(posts::admin_posts))
        .route(
            "/posts/new",
            get(posts::admin_post_new).post(posts::admin_post_create),
        )
        .route(
            "/posts/{slug}/edit",
            get(posts::admin_post_edit).post(posts::admin_post_update),
        )
        .route("/posts/{slug}/delete", post(posts::admin_post_delete))
        .route("/categories", get(categories::admin_categories))
        .route(
            "/categories/{key}/delete",
            post(categories::admin_category_delete),
        )
        .route("/comments", get(comments::admin_comments))
        .route("/comments/{id}/reply", post(comments::admin_comment_reply))
        .route("/comments/{id}/delete", post(comments::admin_comment_delete))
        .route("/subscribers", get(subscribers::admin_subscribers))
        .route(
            "/subscribers/{id}/delete",
            post(subscribers::admin_subscriber_delete),
        )
        .route(
            "/settings",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route("/transfer-access", get(transfer::admin_transfer_access))
        .route_layer(middleware::from_fn_with_state(access, require_admin_access))
        .with_state(state)
}
