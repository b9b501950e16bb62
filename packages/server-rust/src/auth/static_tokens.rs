//! Fixed token table, used for local development and tests.

use async_trait::async_trait;
use subtle::ConstantTimeEq;
use usergraph_core::{Identity, IdentityResolver, Role};

/// Resolves tokens by exact match against a fixed table.
///
/// Comparison is constant-time per entry so the table cannot be probed by
/// timing.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    entries: Vec<(String, Identity)>,
}

impl StaticTokenVerifier {
    /// Table mapping each exact token string to its identity.
    #[must_use]
    pub fn new(entries: Vec<(String, Identity)>) -> Self {
        Self { entries }
    }

    /// The two well-known development tokens: `valid-token` (user) and
    /// `admin-token` (admin).
    #[must_use]
    pub fn development() -> Self {
        Self::new(vec![
            (
                "valid-token".to_string(),
                Identity::new("1", "john@example.com", Role::User),
            ),
            (
                "admin-token".to_string(),
                Identity::new("admin", "admin@example.com", Role::Admin),
            ),
        ])
    }

    /// Number of tokens in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, token: &str) -> Option<&Identity> {
        self.entries
            .iter()
            .find(|(known, _)| bool::from(known.as_bytes().ct_eq(token.as_bytes())))
            .map(|(_, identity)| identity)
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenVerifier {
    async fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        let token = token.filter(|t| !t.is_empty())?;
        self.lookup(token).cloned()
    }
}
