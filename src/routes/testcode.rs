// GET /testcode/:code - deliberately raise a failure with the given status,
// for exercising the error channel end to end.
use async_trait::async_trait;

use crate::error::AppError;
use crate::pipeline::{RequestContext, Response};
use crate::routes::router::TerminalHandler;

pub struct TestCode;

#[async_trait]
impl TerminalHandler for TestCode {
    fn name(&self) -> &'static str {
        "testcode"
    }

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError> {
        let raw = cx
            .param("code")
            .ok_or_else(|| AppError::internal("missing route param 'code'"))?;
        let code: u16 = raw.parse().map_err(|_| {
            AppError::invalid_parameter(format!("Invalid status code '{}': must be numeric", raw))
        })?;
        Err(AppError::StatusEcho(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn numeric_code_is_echoed_as_failure() {
        let mut cx = RequestContext::new(Method::GET, "/testcode/503");
        cx.params.insert("code".to_string(), "503".to_string());
        let err = TestCode.call(&mut cx).await.expect_err("always fails");
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn non_numeric_code_is_invalid_parameter() {
        let mut cx = RequestContext::new(Method::GET, "/testcode/abc");
        cx.params.insert("code".to_string(), "abc".to_string());
        let err = TestCode.call(&mut cx).await.expect_err("rejected");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
