use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use shopfront::catalog::{seed, CatalogBuilder, CatalogStore};
use shopfront::config::AppConfig;
use shopfront::render::{HtmlRenderer, Renderer};
use shopfront::server;
use shopfront::session::{MemoryBackend, SessionStore};

/// In-process app over the memory session backend; no database or listener
/// needed.
pub struct TestApp {
    pub app: Router,
    pub sessions: Arc<SessionStore>,
    pub config: AppConfig,
}

pub fn build(catalog: CatalogStore) -> TestApp {
    let config = AppConfig::from_env();
    let sessions = Arc::new(SessionStore::new(
        Arc::new(MemoryBackend::new()),
        config.session.ttl_days,
    ));
    build_with_sessions(catalog, sessions)
}

pub fn build_with_sessions(catalog: CatalogStore, sessions: Arc<SessionStore>) -> TestApp {
    let config = AppConfig::from_env();
    let renderer: Arc<dyn Renderer> = Arc::new(HtmlRenderer);
    let pipeline = Arc::new(server::build_pipeline(
        Arc::new(catalog),
        sessions.clone(),
        renderer,
        &config,
    ));
    TestApp { app: server::app(pipeline), sessions, config }
}

pub fn seeded() -> TestApp {
    build(seed::sample().expect("seed catalog"))
}

#[allow(dead_code)]
pub fn empty() -> TestApp {
    build(CatalogBuilder::new().build().expect("empty catalog"))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, HeaderMap, String)> {
    get_with_headers(app, uri, &[]).await
}

pub async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> Result<(StatusCode, HeaderMap, String)> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app.clone().oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, headers, String::from_utf8_lossy(&bytes).to_string()))
}
