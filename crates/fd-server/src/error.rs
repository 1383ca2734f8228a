//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fd_site::{PageError, TemplateError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page lookup, compilation or source read failed.
    #[error(transparent)]
    Page(#[from] PageError),

    /// An embedded template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// I/O error (binding the listener, serving).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status for this error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::Page(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Page(PageError::NotFound(path)) => {
                json!({"error": "Page not found", "path": path})
            }
            Self::Page(
                PageError::Compilation { path, .. } | PageError::FrontMatter { path, .. },
            ) => json!({"error": self.to_string(), "path": path}),
            _ => json!({"error": self.to_string()}),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use fd_renderer::CompileError;

    use super::*;

    #[test]
    fn test_not_found_status() {
        let err = ServerError::from(PageError::NotFound("git".to_owned()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_compilation_status() {
        let err = ServerError::from(PageError::Compilation {
            path: "git".to_owned(),
            source: CompileError::UnterminatedCodeBlock { line: 2 },
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
