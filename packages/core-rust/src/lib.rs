//! `UserGraph` Core — identities, user records, per-request context, and data-access contracts.

pub mod context;
pub mod error;
pub mod traits;
pub mod types;

pub use context::RequestContext;
pub use error::{AuthorizationError, DataAccessError};
pub use traits::{DataAccessProvider, IdentityResolver, UserDataAccess};
pub use types::{Identity, NewUser, Role, UnknownRole, User};
