//! HTTP request handlers.

pub(crate) mod docs;
pub(crate) mod navigation;
pub(crate) mod pages;

/// Convert internal path (without leading slash) to URL path (with leading slash).
///
/// The site stores paths without leading slashes (e.g., "git", "git/branching", "" for root),
/// but API clients expect URL paths with leading slashes (e.g., "/git", "/git/branching", "/").
pub(crate) fn to_url_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else {
        format!("/{path}")
    }
}
