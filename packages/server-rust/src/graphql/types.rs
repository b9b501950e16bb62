use async_graphql::{SimpleObject, ID};
use usergraph_core::User;

/// GraphQL `User` output type.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    /// Store-assigned identifier.
    pub id: ID,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id),
            name: user.name,
            email: user.email,
        }
    }
}
