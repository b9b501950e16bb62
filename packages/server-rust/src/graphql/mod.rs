//! GraphQL schema, resolvers and error mapping.

pub mod error;
pub mod schema;
pub mod types;

pub use error::ApiError;
pub use schema::{build_schema, MutationRoot, QueryRoot, UserGraphSchema};
pub use types::UserObject;
