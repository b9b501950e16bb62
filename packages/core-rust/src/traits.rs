use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::types::{Identity, NewUser, User};

/// Maps an opaque token to a caller identity.
///
/// Total function: an absent, malformed or unknown token yields `None`,
/// never an error. Implementations: static token table, signed JWT, chain.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Maps a token to an identity; `None` for a missing or unknown token.
    async fn resolve(&self, token: Option<&str>) -> Option<Identity>;
}

/// Storage-independent operations over the user collection.
///
/// Methods are async so that backends with real I/O can implement them; the
/// in-memory backend completes immediately.
#[async_trait]
pub trait UserDataAccess: Send + Sync {
    /// All users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, DataAccessError>;

    /// Looks up a single user by exact id match.
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DataAccessError>;

    /// Appends a new user and returns it with its assigned id.
    async fn create_user(&self, input: NewUser) -> Result<User, DataAccessError>;
}

/// Hands out a data-access handle scoped to a single request.
///
/// For a database backend this is where a session would be acquired; the
/// handle is dropped together with the request context.
pub trait DataAccessProvider: Send + Sync {
    /// Opens a handle for one request.
    fn open(&self) -> Arc<dyn UserDataAccess>;
}
