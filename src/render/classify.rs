use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::config::Environment;
use crate::error::AppError;
use crate::pipeline::{ErrorHandler, RequestContext, Response};
use crate::render::html::Renderer;
use crate::render::views::{ErrorView, NotFoundView, PageChrome, View};

/// Map a failure to the view that renders it. 404-class failures get the
/// dedicated not-found page; everything else shares the generic error page.
/// Cause detail is suppressed in production.
pub fn classify(failure: &AppError, environment: Environment) -> (StatusCode, View) {
    let status = failure.status_code();
    if status == StatusCode::NOT_FOUND {
        return (status, View::NotFound(NotFoundView { title: failure.page_title().to_string() }));
    }

    let title = if status.is_client_error() { "Request Error" } else { "Server Error" };
    let cause = if environment.is_production() { None } else { failure.cause_detail() };
    (
        status,
        View::Error(ErrorView {
            title: title.to_string(),
            message: failure.message(),
            status_code: status.as_u16(),
            cause,
        }),
    )
}

/// Terminal stage of the error channel: classifies and renders every
/// failure. Infallible, so no failure escapes unrendered.
pub struct ClassifyingErrorHandler {
    renderer: Arc<dyn Renderer>,
    environment: Environment,
}

impl ClassifyingErrorHandler {
    pub fn new(renderer: Arc<dyn Renderer>, environment: Environment) -> Self {
        Self { renderer, environment }
    }
}

#[async_trait]
impl ErrorHandler for ClassifyingErrorHandler {
    fn name(&self) -> &'static str {
        "error-classifier"
    }

    async fn handle(
        &self,
        cx: &mut RequestContext,
        failure: &AppError,
    ) -> Result<Option<Response>, AppError> {
        let (status, view) = classify(failure, self.environment);
        let chrome = PageChrome::from_locals(&cx.locals);
        Ok(Some(Response::html(status, self.renderer.render(&view, &chrome))))
    }
}
