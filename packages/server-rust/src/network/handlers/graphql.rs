//! GraphQL execution endpoint.

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;

use super::AppState;

/// Handles `POST /graphql`.
///
/// Builds a fresh request context from the headers, attaches it to the
/// operation and executes it. In-flight accounting happens in the route
/// middleware, before the body is read.
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let context = state.contexts.build(&headers).await;
    state
        .schema
        .execute(req.into_inner().data(context))
        .await
        .into()
}
