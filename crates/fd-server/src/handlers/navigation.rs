//! Navigation API endpoint.
//!
//! Returns the sidebar navigation of the documentation site.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fd_site::NavItem;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Navigation tree items.
    items: Vec<NavItem>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let items = state.site.navigation();
    Json(NavigationResponse { items })
}
