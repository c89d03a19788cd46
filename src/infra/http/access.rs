//! Admin access gate applied at the router layer.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::application::error::HttpError;
use crate::config::AdminSettings;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

pub trait AdminAccessPolicy: Send + Sync {
    fn permits(&self, headers: &HeaderMap) -> bool;
}

/// Admin is reachable without credentials.
#[derive(Debug, Clone, Default)]
pub struct OpenAccess;

impl AdminAccessPolicy for OpenAccess {
    fn permits(&self, _headers: &HeaderMap) -> bool {
        true
    }
}

/// Requires a shared token in the `x-admin-token` header or the
/// `admin_token` cookie.
#[derive(Clone)]
pub struct TokenAccess {
    token: String,
}

impl TokenAccess {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AdminAccessPolicy for TokenAccess {
    fn permits(&self, headers: &HeaderMap) -> bool {
        presented_token(headers)
            .map(|presented| bool::from(presented.as_bytes().ct_eq(self.token.as_bytes())))
            .unwrap_or(false)
    }
}

fn presented_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        return Some(value.trim().to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ADMIN_TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

pub fn policy_from_settings(settings: &AdminSettings) -> Arc<dyn AdminAccessPolicy> {
    match settings.access_token.as_deref() {
        Some(token) => Arc::new(TokenAccess::new(token)),
        None => Arc::new(OpenAccess),
    }
}

pub(super) async fn require_admin_access(
    State(policy): State<Arc<dyn AdminAccessPolicy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if policy.permits(request.headers()) {
        return next.run(request).await;
    }

    warn!(
        target = "quire::http::access",
        path = %request.uri().path(),
        "Admin request denied"
    );
    HttpError::new(
        "infra::http::access::require_admin_access",
        StatusCode::UNAUTHORIZED,
        "Admin access requires a valid token",
        "missing or mismatched admin token",
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_read_from_header_or_cookie() {
        let policy = TokenAccess::new("s3cret");

        let mut headers = HeaderMap::new();
        assert!(!policy.permits(&headers));

        headers.insert(ADMIN_TOKEN_HEADER, "s3cret".parse().expect("header"));
        assert!(policy.permits(&headers));

        let mut cookies = HeaderMap::new();
        cookies.insert(COOKIE, "theme=dark; admin_token=s3cret".parse().expect("cookie"));
        assert!(policy.permits(&cookies));
    }

    #[test]
    fn wrong_or_partial_tokens_are_denied() {
        let policy = TokenAccess::new("s3cret");
        for attempt in ["s3cre", "s3cret!", "S3CRET", ""] {
            let mut headers = HeaderMap::new();
            headers.insert(ADMIN_TOKEN_HEADER, attempt.parse().expect("header"));
            assert!(!policy.permits(&headers), "accepted {attempt:?}");
        }
    }

    #[test]
    fn settings_choose_the_policy() {
        let open = policy_from_settings(&AdminSettings::default());
        assert!(open.permits(&HeaderMap::new()));

        let gated = policy_from_settings(&AdminSettings {
            access_token: Some("t".into()),
        });
        assert!(!gated.permits(&HeaderMap::new()));
    }
}
