// Request failure types and their status mapping
use axum::http::StatusCode;

use crate::catalog::CatalogError;
use crate::session::SessionError;

/// A failure raised anywhere in the pipeline. Carries the status code the
/// error classifier will render and an optional underlying cause, which is
/// only shown outside production mode.
#[derive(Debug)]
pub enum AppError {
    // 404 Not Found
    RouteNotFound(String),
    CategoryNotFound(String),
    ProductNotFound { category: String, id: u64 },
    CatalogEmpty,

    // 400 Bad Request
    InvalidParameter(String),

    // 500 Internal Server Error
    SessionStoreUnavailable(String),
    Internal(String),

    // Arbitrary status raised by the /testcode route
    StatusEcho(u16),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::RouteNotFound(_)
            | AppError::CategoryNotFound(_)
            | AppError::ProductNotFound { .. }
            | AppError::CatalogEmpty => StatusCode::NOT_FOUND,
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::SessionStoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::StatusEcho(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Client-safe message; internal detail stays in `cause_detail`.
    pub fn message(&self) -> String {
        match self {
            AppError::RouteNotFound(path) => format!("No route matches {}", path),
            AppError::CategoryNotFound(slug) => format!("Category '{}' not found", slug),
            AppError::ProductNotFound { category, id } => {
                format!("Item {} not found in '{}'", id, category)
            }
            AppError::CatalogEmpty => "No categories available".to_string(),
            AppError::InvalidParameter(msg) => msg.clone(),
            AppError::SessionStoreUnavailable(_) => {
                "Session storage is temporarily unavailable".to_string()
            }
            AppError::Internal(_) => "An unexpected error occurred".to_string(),
            AppError::StatusEcho(code) => format!("Test Error ({})", code),
        }
    }

    /// Title shown on the not-found page for 404-class failures.
    pub fn page_title(&self) -> &'static str {
        match self {
            AppError::ProductNotFound { .. } => "Item Not Found",
            _ => "Page Not Found",
        }
    }

    /// Underlying detail, suppressed from rendered output in production.
    pub fn cause_detail(&self) -> Option<String> {
        match self {
            AppError::SessionStoreUnavailable(detail) | AppError::Internal(detail) => {
                Some(detail.clone())
            }
            _ => None,
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        AppError::InvalidParameter(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownCategory(id) => AppError::CategoryNotFound(id.to_string()),
            CatalogError::Empty => AppError::CatalogEmpty,
            other => {
                tracing::error!("catalog error: {}", other);
                AppError::internal(other.to_string())
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        // Log the real error but keep the rendered message generic
        tracing::error!("session store error: {}", err);
        AppError::SessionStoreUnavailable(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}
