//! HS256 JSON Web Token verification.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use usergraph_core::{Identity, IdentityResolver, Role};

/// Claims expected in a signed bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Identity id.
    pub sub: String,
    /// Identity email.
    pub email: String,
    /// Role name, `user` or `admin`.
    pub role: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Verifies HS256-signed tokens with a shared secret.
///
/// Signature, expiry or claim failures all resolve to `None`.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Verifier for tokens signed with `secret`.
    #[must_use]
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    fn verify(&self, token: &str) -> Option<Identity> {
        let data = match decode::<JwtClaims>(token, &self.key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, "bearer token rejected");
                return None;
            }
        };

        let claims = data.claims;
        match claims.role.parse::<Role>() {
            Ok(role) => Some(Identity::new(claims.sub, claims.email, role)),
            Err(e) => {
                debug!(error = %e, "bearer token carries unknown role");
                None
            }
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityResolver for JwtVerifier {
    async fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        let token = token.filter(|t| !t.is_empty())?;
        self.verify(token)
    }
}
