#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use quire::config::{self, CliArgs, Command, ServeArgs, ServeOverrides, Settings};
use quire::infra::{app, memory::InMemoryRepositories};
use serde_json::Value;
use tower::ServiceExt;

/// Defaults from `config/default.toml` with the artificial latency removed.
pub fn test_settings() -> Settings {
    let cli = CliArgs {
        config_file: None,
        command: Some(Command::Serve(Box::new(ServeArgs {
            overrides: ServeOverrides {
                mutations_simulated_latency_ms: Some(0),
                ..Default::default()
            },
        }))),
    };
    config::load(&cli).expect("test settings load")
}

pub fn demo_app() -> Router {
    app_with(test_settings())
}

pub fn app_with(settings: Settings) -> Router {
    app::build_app(InMemoryRepositories::with_demo_content(), &settings).expect("app builds")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send_form(app, uri, body, false).await
}

pub async fn post_form_datastar(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send_form(app, uri, body, true).await
}

async fn send_form(app: &Router, uri: &str, body: &str, datastar: bool) -> Response<Body> {
    let mut request = Request::post(uri).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if datastar {
        request = request.header("datastar-request", "true");
    }
    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).expect("request"))
        .await
        .expect("response")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body bytes")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Status and parsed JSON of a plain (non-datastar) mutation response.
pub async fn json_response(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let text = body_text(response).await;
    let json = serde_json::from_str(&text).expect("json body");
    (status, json)
}
