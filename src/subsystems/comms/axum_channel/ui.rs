//! UI route handlers for the axum channel.
//!
//! The chat page is compiled into the binary; it talks to `/get_response`
//! and `/history` with `fetch`.

use axum::{http::StatusCode, response::Html};

const INDEX_HTML: &str = include_str!("../../../../ui/index.html");

/// GET / — chat page.
pub(super) async fn root() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /favicon.ico — nothing to serve.
pub(super) async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
