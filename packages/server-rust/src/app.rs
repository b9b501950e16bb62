//! Wires configuration, identity resolution, storage and GraphQL together.

use std::sync::Arc;

use tracing::info;
use usergraph_core::IdentityResolver;

use crate::auth::{ChainVerifier, JwtVerifier, StaticTokenVerifier};
use crate::config::ServerConfig;
use crate::context_builder::ContextBuilder;
use crate::graphql::build_schema;
use crate::network::NetworkModule;
use crate::storage::{MemoryDataSource, UserStore};

/// Development tokens first, then signed tokens when a secret is configured.
#[must_use]
pub fn identity_resolver(config: &ServerConfig) -> Arc<dyn IdentityResolver> {
    let mut chain = ChainVerifier::new().with(Arc::new(StaticTokenVerifier::development()));
    if let Some(secret) = config.jwt_secret.as_deref() {
        info!("JWT bearer token verification enabled");
        chain = chain.with(Arc::new(JwtVerifier::hs256(secret.as_bytes())));
    }
    Arc::new(chain)
}

/// Builds the network module serving `store`.
#[must_use]
pub fn assemble(config: &ServerConfig, store: Arc<UserStore>) -> NetworkModule {
    let contexts = ContextBuilder::new(
        identity_resolver(config),
        Arc::new(MemoryDataSource::new(store)),
    );
    NetworkModule::new(config.network(), build_schema(), contexts)
}
