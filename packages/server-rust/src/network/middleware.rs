//! Tower middleware applied to every HTTP route, plus in-flight tracking
//! for the GraphQL endpoint.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::HeaderName;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::config::NetworkConfig;
use super::lifecycle::Lifecycle;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps `router` in the HTTP middleware stack.
///
/// Outermost first: request id, tracing, compression, CORS, timeout (408),
/// request id propagation onto the response.
pub fn with_http_layers<S>(router: Router<S>, config: &NetworkConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors_layer(&config.cors_origins))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.request_timeout,
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// Counts the request as in flight from the moment its headers arrive
/// until the response is produced, so bodies still uploading are included.
pub async fn track_in_flight(
    State(lifecycle): State<Arc<Lifecycle>>,
    request: Request,
    next: Next,
) -> Response {
    let _in_flight = lifecycle.in_flight_guard();
    next.run(request).await
}

/// `"*"` anywhere in `origins` allows any origin; otherwise unparsable
/// entries are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
