//! Error types shared by resolvers and data-access implementations.

/// A resolver required an authenticated caller and none was present.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// No identity was resolved for the request.
    #[error("Authentication required to {action}")]
    Unauthenticated { action: &'static str },
}

/// Failure reported by a data-access backend.
///
/// The in-memory store never produces these; they exist for backends that
/// talk to real storage.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DataAccessError {
    /// The backend could not be reached.
    #[error("data store unavailable: {0}")]
    Unavailable(String),
    /// A write violated a storage constraint.
    #[error("constraint violated: {0}")]
    Constraint(String),
    /// Any other backend failure.
    #[error("data access failed: {0}")]
    Internal(String),
}
