//! Mapping of domain failures onto GraphQL errors.

use async_graphql::{Error, ErrorExtensions};
use usergraph_core::{AuthorizationError, DataAccessError};

/// Errors a resolver can surface to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The operation needs an identity and the request has none.
    #[error(transparent)]
    Unauthenticated(#[from] AuthorizationError),
    /// The cause is logged server-side, not returned to the caller.
    #[error("Data access failed")]
    DataAccess(#[from] DataAccessError),
}

impl ApiError {
    /// Value of `extensions.code` in the GraphQL error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::DataAccess(_) => "DATA_ACCESS_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let code = self.code();
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
