use std::time::Instant;

use async_trait::async_trait;

use crate::pipeline::{Handler, Outcome, RequestContext, Response};

/// Marks the request start and stamps the elapsed time on the response.
pub struct TimingMiddleware;

#[async_trait]
impl Handler for TimingMiddleware {
    fn name(&self) -> &'static str {
        "timing"
    }

    async fn handle(&self, cx: &mut RequestContext) -> Outcome {
        cx.started_at = Some(Instant::now());
        Outcome::Continue
    }

    async fn finalize(&self, cx: &mut RequestContext, response: &mut Response) {
        if let Some(start) = cx.started_at {
            let elapsed = start.elapsed();
            response.set_header("x-response-time", format!("{}ms", elapsed.as_millis()));
            tracing::debug!(
                method = %cx.method,
                path = %cx.path,
                elapsed_ms = elapsed.as_millis() as u64,
                "request completed"
            );
        }
    }
}
