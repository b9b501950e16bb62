use std::fmt;
use std::sync::Arc;

use crate::error::AuthorizationError;
use crate::traits::UserDataAccess;
use crate::types::Identity;

/// Per-request context carrying the caller identity and a data-access handle.
///
/// Built once before any resolver runs and never mutated afterwards. Each
/// request owns its own context; nothing is cached across requests.
#[derive(Clone)]
pub struct RequestContext {
    identity: Option<Identity>,
    data: Arc<dyn UserDataAccess>,
    raw_token: Option<String>,
}

impl RequestContext {
    /// Bundles the resolved identity (if any), a data-access handle and the
    /// token as received.
    #[must_use]
    pub fn new(
        identity: Option<Identity>,
        data: Arc<dyn UserDataAccess>,
        raw_token: Option<String>,
    ) -> Self {
        Self {
            identity,
            data,
            raw_token,
        }
    }

    /// Resolved caller, if the token mapped to one.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Data-access handle bound to this request.
    #[must_use]
    pub fn data(&self) -> &dyn UserDataAccess {
        self.data.as_ref()
    }

    /// Token as extracted from the request headers, before resolution.
    #[must_use]
    pub fn raw_token(&self) -> Option<&str> {
        self.raw_token.as_deref()
    }

    /// `true` when any identity was resolved, whatever its role.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the identity or an authorization error naming `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::Unauthenticated`] when no identity was
    /// resolved for this request.
    pub fn require_identity(
        &self,
        action: &'static str,
    ) -> Result<&Identity, AuthorizationError> {
        self.identity
            .as_ref()
            .ok_or(AuthorizationError::Unauthenticated { action })
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The raw token is a credential; only report whether one was sent.
        f.debug_struct("RequestContext")
            .field("identity", &self.identity)
            .field("has_token", &self.raw_token.is_some())
            .finish_non_exhaustive()
    }
}
