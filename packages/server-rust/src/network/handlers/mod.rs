//! HTTP handler definitions.
//!
//! Defines [`AppState`], the shared state carried through axum extractors,
//! and re-exports the handlers used by the router.

pub mod graphql;
pub mod health;
pub mod playground;

pub use graphql::graphql_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use playground::playground_handler;

use std::sync::Arc;
use std::time::Instant;

use super::{Lifecycle, NetworkConfig};
use crate::context_builder::ContextBuilder;
use crate::graphql::UserGraphSchema;

/// Shared application state passed to all handlers via `State` extraction.
///
/// Everything is behind `Arc` or internally shared, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema.
    pub schema: UserGraphSchema,
    /// Builds the per-request context for each GraphQL operation.
    pub contexts: Arc<ContextBuilder>,
    /// Health state and in-flight tracking.
    pub lifecycle: Arc<Lifecycle>,
    /// Transport settings, including playground access.
    pub config: Arc<NetworkConfig>,
    /// Process start time, for uptime reporting.
    pub start_time: Instant,
}
