// Ordered, short-circuiting handler chain with a separate error channel.
pub mod context;

pub use context::{Body, RequestContext, Response, SessionView};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;

/// Explicit result of one handler invocation. This replaces implicit
/// continuation-passing: the run loop is a plain loop over this value.
pub enum Outcome {
    Continue,
    Respond(Response),
    Fail(AppError),
}

/// A unit of request-processing logic. `handle` runs in registration order;
/// `finalize` runs in reverse order once a response exists, for handlers
/// that stamp response metadata (timing header, session cookie).
#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, cx: &mut RequestContext) -> Outcome;

    async fn finalize(&self, _cx: &mut RequestContext, _response: &mut Response) {}
}

/// Error-channel handler. Returning `Ok(None)` passes the failure along;
/// `Err` from inside the error chain is a fatal configuration error.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        cx: &mut RequestContext,
        failure: &AppError,
    ) -> Result<Option<Response>, AppError>;
}

/// Terminal state of one request's execution.
pub enum Completion {
    Responded(Response),
    /// An error handler itself failed; the connection is dropped without a
    /// rendered body.
    Fatal,
}

/// The configured chain: ordered ordinary handlers plus ordered error
/// handlers, built once at startup and shared across requests. There is no
/// process-wide registry; callers pass the pipeline into the server.
#[derive(Default)]
pub struct Pipeline {
    handlers: Vec<Arc<dyn Handler>>,
    error_handlers: Vec<Arc<dyn ErrorHandler>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        tracing::debug!("registered handler '{}'", handler.name());
        self.handlers.push(handler);
    }

    pub fn register_error_handler(&mut self, handler: Arc<dyn ErrorHandler>) {
        tracing::debug!("registered error handler '{}'", handler.name());
        self.error_handlers.push(handler);
    }

    /// Execute the chain for one request. States: ordinary handlers run in
    /// order until one responds or fails; a failure (or falling off the end,
    /// which raises a synthetic 404) diverts to the error chain; the first
    /// error handler to respond wins. Error handlers are never re-entered.
    pub async fn run(&self, cx: &mut RequestContext) -> Completion {
        let mut response: Option<Response> = None;
        let mut failure: Option<AppError> = None;

        for handler in &self.handlers {
            match handler.handle(cx).await {
                Outcome::Continue => continue,
                Outcome::Respond(res) => {
                    response = Some(res);
                    break;
                }
                Outcome::Fail(err) => {
                    tracing::debug!("handler '{}' failed: {}", handler.name(), err);
                    failure = Some(err);
                    break;
                }
            }
        }

        // Catch-all terminal stage: nothing matched, nothing failed
        if response.is_none() && failure.is_none() {
            failure = Some(AppError::RouteNotFound(cx.path.clone()));
        }

        if let Some(err) = failure {
            tracing::warn!(
                status = err.status_code().as_u16(),
                method = %cx.method,
                path = %cx.path,
                "request failed: {}",
                err
            );
            for handler in &self.error_handlers {
                match handler.handle(cx, &err).await {
                    Ok(Some(res)) => {
                        response = Some(res);
                        break;
                    }
                    Ok(None) => continue,
                    Err(inner) => {
                        tracing::error!(
                            "error handler '{}' failed while handling '{}': {}",
                            handler.name(),
                            err,
                            inner
                        );
                        return Completion::Fatal;
                    }
                }
            }
            cx.failure = Some(err);
        }

        let Some(mut res) = response else {
            tracing::error!("no error handler produced a response for {}", cx.path);
            return Completion::Fatal;
        };

        for handler in self.handlers.iter().rev() {
            handler.finalize(cx, &mut res).await;
        }

        Completion::Responded(res)
    }
}
