//! `UserGraph` Server — GraphQL user API over axum with a per-request auth context.

pub mod app;
pub mod auth;
pub mod config;
pub mod context_builder;
pub mod graphql;
pub mod network;
pub mod observability;
pub mod storage;

pub use app::assemble;
pub use config::ServerConfig;
pub use context_builder::ContextBuilder;
pub use graphql::{build_schema, UserGraphSchema};
pub use network::NetworkModule;
