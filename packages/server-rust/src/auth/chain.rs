//! Ordered fan-out over several identity resolvers.

use std::sync::Arc;

use async_trait::async_trait;
use usergraph_core::{Identity, IdentityResolver};

/// Tries each resolver in order; the first identity found wins.
#[derive(Default)]
pub struct ChainVerifier {
    resolvers: Vec<Arc<dyn IdentityResolver>>,
}

impl ChainVerifier {
    /// An empty chain; resolves nothing until resolvers are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver to the end of the chain.
    #[must_use]
    pub fn with(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Number of resolvers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[async_trait]
impl IdentityResolver for ChainVerifier {
    async fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        for resolver in &self.resolvers {
            if let Some(identity) = resolver.resolve(token).await {
                return Some(identity);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use usergraph_core::Role;

    use super::*;
    use crate::auth::StaticTokenVerifier;

    fn table(token: &str, id: &str) -> Arc<dyn IdentityResolver> {
        Arc::new(StaticTokenVerifier::new(vec![(
            token.to_string(),
            Identity::new(id, format!("{id}@example.com"), Role::User),
        )]))
    }

    #[tokio::test]
    async fn empty_chain_resolves_nothing() {
        let chain = ChainVerifier::new();
        assert!(chain.is_empty());
        assert!(chain.resolve(Some("valid-token")).await.is_none());
    }

    #[tokio::test]
    async fn falls_through_to_later_resolver() {
        let chain = ChainVerifier::new()
            .with(table("a", "first"))
            .with(table("b", "second"));

        let identity = chain.resolve(Some("b")).await.unwrap();
        assert_eq!(identity.id, "second");
        assert_eq!(chain.len(), 2);
    }

    #[tokio::test]
    async fn first_match_wins() {
        let chain = ChainVerifier::new()
            .with(table("shared", "first"))
            .with(table("shared", "second"));

        let identity = chain.resolve(Some("shared")).await.unwrap();
        assert_eq!(identity.id, "first");
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let chain = ChainVerifier::new().with(table("a", "first"));
        assert!(chain.resolve(Some("zzz")).await.is_none());
        assert!(chain.resolve(None).await.is_none());
    }
}
