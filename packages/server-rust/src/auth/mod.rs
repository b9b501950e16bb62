//! Identity resolution: header token extraction and pluggable verifiers.
//!
//! Every verifier implements [`IdentityResolver`](usergraph_core::IdentityResolver)
//! and maps an unknown or invalid token to `None` rather than an error, so
//! verifiers can be swapped or chained without touching the context builder
//! or the resolvers.

pub mod chain;
pub mod extract;
pub mod jwt;
pub mod static_tokens;

pub use chain::ChainVerifier;
pub use extract::extract_token;
pub use jwt::{JwtClaims, JwtVerifier};
pub use static_tokens::StaticTokenVerifier;
