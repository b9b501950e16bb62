//! In-memory user storage.
//!
//! [`UserStore`] is the process-wide collection. Each request gets its own
//! [`MemoryUserAccess`] handle from [`MemoryDataSource`]; the handles share
//! the store but hold no state of their own.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use usergraph_core::{DataAccessError, DataAccessProvider, NewUser, User, UserDataAccess};

/// Insertion-ordered user collection shared by all requests.
///
/// Ids are assigned as `len + 1` while holding the write lock, so concurrent
/// inserts never observe the same length. This only yields gap-free unique
/// ids because records are never removed.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records, in order.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Store preloaded with the two sample users.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_users(vec![
            User {
                id: "1".to_string(),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
            },
            User {
                id: "2".to_string(),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
            },
        ])
    }

    /// Point-in-time copy of all users.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// The user with exactly this id, if any.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    /// Appends a user with the next sequential id.
    pub fn insert(&self, input: NewUser) -> User {
        let mut users = self.users.write();
        let user = User {
            id: (users.len() + 1).to_string(),
            name: input.name,
            email: input.email,
        };
        users.push(user.clone());
        user
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

/// Request-scoped handle over a shared [`UserStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserAccess {
    store: Arc<UserStore>,
}

impl MemoryUserAccess {
    /// Handle over `store`.
    #[must_use]
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserDataAccess for MemoryUserAccess {
    async fn list_users(&self) -> Result<Vec<User>, DataAccessError> {
        Ok(self.store.list())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, DataAccessError> {
        Ok(self.store.find(id))
    }

    async fn create_user(&self, input: NewUser) -> Result<User, DataAccessError> {
        Ok(self.store.insert(input))
    }
}

/// Opens [`MemoryUserAccess`] handles over one shared store.
#[derive(Debug, Clone)]
pub struct MemoryDataSource {
    store: Arc<UserStore>,
}

impl MemoryDataSource {
    /// Factory whose handles all share `store`.
    #[must_use]
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// Returns the shared store backing every handle.
    #[must_use]
    pub fn store(&self) -> Arc<UserStore> {
        Arc::clone(&self.store)
    }
}

impl DataAccessProvider for MemoryDataSource {
    fn open(&self) -> Arc<dyn UserDataAccess> {
        Arc::new(MemoryUserAccess::new(Arc::clone(&self.store)))
    }
}
