//! Apollo Sandbox page for exploring the API from a browser.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::AppState;
use crate::network::PlaygroundAccess;

const DISABLED_MESSAGE: &str =
    "GraphQL Playground is disabled in production. Set ALLOW_PLAYGROUND=true to enable it.";

const SANDBOX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>UserGraph Sandbox</title>
    <style>body { margin: 0; overflow: hidden; }</style>
</head>
<body>
    <div id="sandbox" style="height: 100vh;"></div>
    <script src="https://embeddable-sandbox.cdn.apollographql.com/_latest/embeddable-sandbox.umd.production.min.js"></script>
    <script>
        new window.EmbeddedSandbox({
            target: '#sandbox',
            initialEndpoint: window.location.origin + '/graphql',
        });
    </script>
</body>
</html>"#;

/// Serves the sandbox page, or 403 when it is disabled in production.
pub async fn playground_handler(State(state): State<AppState>) -> Response {
    match state.config.playground {
        PlaygroundAccess::Enabled => Html(SANDBOX_HTML).into_response(),
        PlaygroundAccess::DisabledInProduction => (
            StatusCode::FORBIDDEN,
            Json(json!({ "status": "error", "message": DISABLED_MESSAGE })),
        )
            .into_response(),
    }
}
