//! HTML documentation pages.
//!
//! Every request is resolved, compiled and assembled on its own: a page
//! that fails to compile yields a 500 error page while the rest of the site
//! keeps serving.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET / (landing page).
pub(crate) async fn get_home(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    Ok(Html(state.assembler.home()?).into_response())
}

/// Handle GET {base} (docs root page).
pub(crate) async fn get_docs_root(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    render_docs(&state, "", &uri)
}

/// Handle GET {base}/{path}.
pub(crate) async fn get_docs_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    render_docs(&state, &path, &uri)
}

/// Not-found page for any unrouted URL.
pub(crate) async fn fallback(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    not_found(&state, &uri)
}

fn render_docs(state: &AppState, path: &str, uri: &Uri) -> Result<Response, ServerError> {
    match state.site.render_path(path) {
        Ok(page) => Ok(Html(state.assembler.assemble(&page)?).into_response()),
        Err(e) if e.is_not_found() => not_found(state, uri),
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to render page");
            let html = state.assembler.compile_error(path, &e)?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response())
        }
    }
}

fn not_found(state: &AppState, uri: &Uri) -> Result<Response, ServerError> {
    tracing::debug!(path = %uri.path(), "Page not found");
    let html = state.assembler.not_found(uri.path())?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
