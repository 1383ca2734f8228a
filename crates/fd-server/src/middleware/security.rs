//! Response hardening headers.
//!
//! Every response is sent with a Content-Security-Policy, `nosniff` and
//! `X-Frame-Options: DENY`.

use axum::http::HeaderValue;
use axum::http::header::{CONTENT_SECURITY_POLICY, HeaderName, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use tower_http::set_header::SetResponseHeaderLayer;

/// Pages pull the Tailwind runtime and the Tabler icon font from CDNs and
/// switch tabs with an inline script.
const CSP: &str = "default-src 'self'; \
                   script-src 'self' 'unsafe-inline' https://cdn.tailwindcss.com; \
                   style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
                   font-src 'self' data: https://cdn.jsdelivr.net; \
                   img-src 'self' data: https:; \
                   connect-src 'self'; \
                   frame-ancestors 'none'";

fn always(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always(CONTENT_SECURITY_POLICY, CSP)
}

pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always(X_CONTENT_TYPE_OPTIONS, "nosniff")
}

pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    always(X_FRAME_OPTIONS, "DENY")
}
