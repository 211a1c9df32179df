//! Landing page handler.

use axum::response::Html;

/// Landing page markup, embedded at build time.
const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET / - Render the landing page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
