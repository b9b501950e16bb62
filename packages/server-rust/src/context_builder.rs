//! Builds the per-request [`RequestContext`] from raw request headers.

use std::sync::Arc;

use http::HeaderMap;
use tracing::debug;
use usergraph_core::{DataAccessProvider, IdentityResolver, RequestContext};

use crate::auth::extract_token;

/// Combines token extraction, identity resolution and a fresh data-access
/// handle into one immutable [`RequestContext`].
///
/// Runs exactly once per GraphQL operation, before any resolver. It never
/// fails: an unresolvable token just produces a context without identity.
#[derive(Clone)]
pub struct ContextBuilder {
    resolver: Arc<dyn IdentityResolver>,
    data: Arc<dyn DataAccessProvider>,
}

impl ContextBuilder {
    /// Builder over `resolver` and the factory for data-access handles.
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolver>, data: Arc<dyn DataAccessProvider>) -> Self {
        Self { resolver, data }
    }

    /// Builds the context for one operation. Never fails: a missing or
    /// unknown token yields an anonymous context.
    pub async fn build(&self, headers: &HeaderMap) -> RequestContext {
        let token = extract_token(headers);
        let identity = self.resolver.resolve(token.as_deref()).await;

        debug!(
            authenticated = identity.is_some(),
            role = identity.as_ref().map(|i| i.role.as_str()),
            token_present = token.is_some(),
            "request context built"
        );

        RequestContext::new(identity, self.data.open(), token)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use usergraph_core::{Identity, NewUser, Role};

    use super::*;
    use crate::auth::StaticTokenVerifier;
    use crate::storage::{MemoryDataSource, UserStore};

    fn builder() -> (ContextBuilder, Arc<UserStore>) {
        let store = Arc::new(UserStore::seeded());
        let builder = ContextBuilder::new(
            Arc::new(StaticTokenVerifier::development()),
            Arc::new(MemoryDataSource::new(Arc::clone(&store))),
        );
        (builder, store)
    }

    fn with_header(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[tokio::test]
    async fn no_headers_builds_anonymous_context() {
        let (builder, _) = builder();
        let ctx = builder.build(&HeaderMap::new()).await;
        assert!(!ctx.is_authenticated());
        assert!(ctx.raw_token().is_none());
    }

    #[tokio::test]
    async fn bearer_token_resolves_identity() {
        let (builder, _) = builder();
        let ctx = builder
            .build(&with_header("authorization", "Bearer valid-token"))
            .await;
        assert_eq!(
            ctx.identity(),
            Some(&Identity::new("1", "john@example.com", Role::User))
        );
        assert_eq!(ctx.raw_token(), Some("valid-token"));
    }

    #[tokio::test]
    async fn token_header_resolves_identity() {
        let (builder, _) = builder();
        let ctx = builder.build(&with_header("token", "admin-token")).await;
        assert_eq!(ctx.identity().map(|i| i.role), Some(Role::Admin));
    }

    #[tokio::test]
    async fn unknown_token_keeps_raw_token_without_identity() {
        let (builder, _) = builder();
        let ctx = builder
            .build(&with_header("authorization", "Bearer nope"))
            .await;
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.raw_token(), Some("nope"));
    }

    #[tokio::test]
    async fn each_context_gets_its_own_handle_over_one_store() {
        let (builder, store) = builder();
        let first = builder.build(&HeaderMap::new()).await;
        let second = builder.build(&HeaderMap::new()).await;

        first
            .data()
            .create_user(NewUser::new("Via First", "first@example.com"))
            .await
            .unwrap();

        let seen = second.data().list_users().await.unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(store.len(), 3);
    }
}
