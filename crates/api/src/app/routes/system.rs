use axum::{
    Json,
    extract::Extension,
    http::Uri,
    response::{Html, IntoResponse},
};

use crate::app::errors::ApiError;
use crate::context::IdentityContext;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Miranda API</title></head>
<body>
<h1>Miranda hotel dashboard API</h1>
<p>Sign in with <code>POST /login</code>, then send the token as
<code>Authorization: Bearer &lt;token&gt;</code> to
<code>/rooms</code>, <code>/users</code>, <code>/booking</code> and <code>/contact</code>.</p>
</body>
</html>
"#;

/// Public landing page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn whoami(Extension(identity): Extension<IdentityContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "sub": identity.subject(),
        "email": identity.email(),
        "expires_at": identity.expires_at().to_rfc3339(),
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "no route matched");
    ApiError::not_found("Route not found")
}
