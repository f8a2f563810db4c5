// Host-framework glue: one catch-all service adapts HTTP requests to the
// pipeline and pipeline responses back. All routing lives in the pipeline.
use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::Response as AxumResponse;
use axum::Router as AxumRouter;
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogStore;
use crate::config::AppConfig;
use crate::middleware::{GlobalsMiddleware, SessionMiddleware, TimingMiddleware};
use crate::pipeline::{Body as ResponseBody, Completion, Pipeline, RequestContext, Response};
use crate::render::{ClassifyingErrorHandler, Renderer};
use crate::routes;
use crate::session::SessionStore;

/// Assemble the full chain: timing, shared display values, session attach,
/// router, and the classifying error handler. Order is load-bearing.
pub fn build_pipeline(
    catalog: Arc<CatalogStore>,
    sessions: Arc<SessionStore>,
    renderer: Arc<dyn Renderer>,
    config: &AppConfig,
) -> Pipeline {
    let mut pipeline = Pipeline::new();
    pipeline.register(Arc::new(TimingMiddleware));
    pipeline.register(Arc::new(GlobalsMiddleware::new(catalog.clone())));
    pipeline.register(Arc::new(SessionMiddleware::new(sessions, &config.session)));
    pipeline.register(Arc::new(routes::build_router(catalog, renderer.clone())));
    pipeline.register_error_handler(Arc::new(ClassifyingErrorHandler::new(
        renderer,
        config.environment,
    )));
    pipeline
}

pub fn app(pipeline: Arc<Pipeline>) -> AxumRouter {
    AxumRouter::new()
        .fallback(handle)
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
}

async fn handle(State(pipeline): State<Arc<Pipeline>>, request: Request<Body>) -> AxumResponse {
    let mut cx = context_from(&request);
    match pipeline.run(&mut cx).await {
        Completion::Responded(response) => into_axum(response),
        // Terminated without a rendered body
        Completion::Fatal => bare_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn context_from(request: &Request<Body>) -> RequestContext {
    let query = request
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<HashMap<String, String>>()
        })
        .unwrap_or_default();
    let cookies = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_cookies)
        .unwrap_or_default();

    RequestContext::new(request.method().clone(), request.uri().path())
        .with_query(query)
        .with_cookies(cookies)
}

fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn into_axum(response: Response) -> AxumResponse {
    let mut builder = axum::http::Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(name, value);
    }
    let built = match response.body {
        ResponseBody::Html(html) => builder
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(html)),
        ResponseBody::Redirect(location) => {
            builder.header(header::LOCATION, location).body(Body::empty())
        }
        ResponseBody::Empty => builder.body(Body::empty()),
    };
    built.unwrap_or_else(|err| {
        tracing::error!("failed to assemble response: {}", err);
        bare_status(StatusCode::INTERNAL_SERVER_ERROR)
    })
}

fn bare_status(status: StatusCode) -> AxumResponse {
    let mut response = AxumResponse::new(Body::empty());
    *response.status_mut() = status;
    response
}
