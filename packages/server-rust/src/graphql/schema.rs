//! Query and mutation resolvers.
//!
//! Resolvers read the [`RequestContext`] that the HTTP handler attaches to
//! every request. They hold no state between operations.

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema};
use tracing::{error, info, warn};
use usergraph_core::{NewUser, RequestContext};

use super::error::ApiError;
use super::types::UserObject;

/// Executable schema type served at `/graphql`.
pub type UserGraphSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

const ANONYMOUS_GREETING: &str = "Hello World from Apollo GraphQL!";

/// Builds the executable schema.
#[must_use]
pub fn build_schema() -> UserGraphSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

/// Root query type.
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Greets the caller, personalised when a token resolved to an identity.
    async fn hello(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        let request = ctx.data::<RequestContext>()?;
        let greeting = match request.identity() {
            Some(identity) => format!(
                "Hello {}! You are logged in as {}.",
                identity.email, identity.role
            ),
            None => ANONYMOUS_GREETING.to_string(),
        };
        Ok(Some(greeting))
    }

    /// All users, in insertion order. Readable without authentication.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let request = ctx.data::<RequestContext>()?;
        let users = request.data().list_users().await.map_err(|e| {
            error!(error = %e, "listing users failed");
            ApiError::from(e).extend()
        })?;
        Ok(users.into_iter().map(UserObject::from).collect())
    }
}

/// Root mutation type.
#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Creates a user. Any authenticated caller may do this.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
    ) -> Result<UserObject> {
        let request = ctx.data::<RequestContext>()?;

        let actor = request.require_identity("create users").map_err(|e| {
            warn!("unauthenticated createUser rejected");
            ApiError::from(e).extend()
        })?;

        let user = request
            .data()
            .create_user(NewUser { name, email })
            .await
            .map_err(|e| {
                error!(error = %e, actor = %actor.id, "creating user failed");
                ApiError::from(e).extend()
            })?;

        info!(user_id = %user.id, actor = %actor.id, "user created");
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::{Request, Response, Value};
    use async_trait::async_trait;
    use serde_json::json;
    use usergraph_core::{DataAccessError, Identity, Role, User, UserDataAccess};

    use super::*;
    use crate::storage::{MemoryUserAccess, UserStore};

    fn context(identity: Option<Identity>, store: &Arc<UserStore>) -> RequestContext {
        RequestContext::new(
            identity,
            Arc::new(MemoryUserAccess::new(Arc::clone(store))),
            None,
        )
    }

    fn user() -> Identity {
        Identity::new("1", "john@example.com", Role::User)
    }

    fn admin() -> Identity {
        Identity::new("admin", "admin@example.com", Role::Admin)
    }

    async fn run(query: &str, ctx: RequestContext) -> Response {
        build_schema().execute(Request::new(query).data(ctx)).await
    }

    fn data(response: Response) -> serde_json::Value {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    const CREATE: &str =
        r#"mutation { createUser(name: "Ada", email: "ada@example.com") { id name email } }"#;

    #[test]
    fn sdl_matches_published_schema() {
        let sdl = build_schema().sdl();
        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("hello: String"));
        assert!(!sdl.contains("hello: String!"));
        assert!(sdl.contains("users: [User!]!"));
        assert!(sdl.contains("type User {"));
        assert!(sdl.contains("id: ID!"));
        assert!(sdl.contains("name: String!"));
        assert!(sdl.contains("email: String!"));
        assert!(sdl.contains("type Mutation {"));
        assert!(sdl.contains("createUser(name: String!, email: String!): User!"));
    }

    #[tokio::test]
    async fn hello_anonymous() {
        let store = Arc::new(UserStore::seeded());
        let response = run("{ hello }", context(None, &store)).await;
        assert_eq!(
            data(response),
            json!({ "hello": "Hello World from Apollo GraphQL!" })
        );
    }

    #[tokio::test]
    async fn hello_personalised_for_user_and_admin() {
        let store = Arc::new(UserStore::seeded());

        let response = run("{ hello }", context(Some(user()), &store)).await;
        assert_eq!(
            data(response)["hello"],
            "Hello john@example.com! You are logged in as user."
        );

        let response = run("{ hello }", context(Some(admin()), &store)).await;
        assert_eq!(
            data(response)["hello"],
            "Hello admin@example.com! You are logged in as admin."
        );
    }

    #[tokio::test]
    async fn users_is_public() {
        let store = Arc::new(UserStore::seeded());
        let response = run("{ users { id name email } }", context(None, &store)).await;
        assert_eq!(
            data(response),
            json!({ "users": [
                { "id": "1", "name": "John Doe", "email": "john@example.com" },
                { "id": "2", "name": "Jane Smith", "email": "jane@example.com" },
            ]})
        );
    }

    #[tokio::test]
    async fn create_user_requires_identity() {
        let store = Arc::new(UserStore::seeded());
        let before = store.list();

        let response = run(CREATE, context(None, &store)).await;

        assert_eq!(response.errors.len(), 1);
        let err = &response.errors[0];
        assert_eq!(err.message, "Authentication required to create users");
        assert_eq!(
            err.extensions.as_ref().and_then(|e| e.get("code")),
            Some(&Value::String("UNAUTHENTICATED".to_string()))
        );
        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn create_user_appends_for_any_role() {
        let store = Arc::new(UserStore::seeded());

        let response = run(CREATE, context(Some(user()), &store)).await;
        assert_eq!(
            data(response),
            json!({ "createUser": { "id": "3", "name": "Ada", "email": "ada@example.com" } })
        );
        assert_eq!(store.list().last().map(|u| u.id.as_str()), Some("3"));
    }

    #[tokio::test]
    async fn admin_creates_three_then_four() {
        let store = Arc::new(UserStore::seeded());

        let first = run(
            r#"mutation { createUser(name: "A", email: "a@example.com") { id } }"#,
            context(Some(admin()), &store),
        )
        .await;
        let second = run(
            r#"mutation { createUser(name: "B", email: "b@example.com") { id } }"#,
            context(Some(admin()), &store),
        )
        .await;

        assert_eq!(data(first)["createUser"]["id"], "3");
        assert_eq!(data(second)["createUser"]["id"], "4");

        let listed = data(run("{ users { id } }", context(None, &store)).await);
        assert_eq!(listed["users"][3]["id"], "4");
    }

    #[tokio::test]
    async fn missing_arguments_are_rejected_by_schema() {
        let store = Arc::new(UserStore::seeded());
        let response = run(
            r#"mutation { createUser(name: "A") { id } }"#,
            context(Some(admin()), &store),
        )
        .await;
        assert!(!response.errors.is_empty());
        assert_eq!(store.len(), 2);
    }

    struct BrokenStore;

    #[async_trait]
    impl UserDataAccess for BrokenStore {
        async fn list_users(&self) -> Result<Vec<User>, DataAccessError> {
            Err(DataAccessError::Unavailable("connection refused".into()))
        }

        async fn find_user_by_id(&self, _id: &str) -> Result<Option<User>, DataAccessError> {
            Err(DataAccessError::Unavailable("connection refused".into()))
        }

        async fn create_user(&self, _input: NewUser) -> Result<User, DataAccessError> {
            Err(DataAccessError::Constraint("email taken".into()))
        }
    }

    #[tokio::test]
    async fn data_access_failures_become_graphql_errors() {
        let ctx = RequestContext::new(Some(admin()), Arc::new(BrokenStore), None);

        let response = run("{ users { id } }", ctx.clone()).await;
        assert_eq!(response.errors[0].message, "Data access failed");

        let response = run(CREATE, ctx).await;
        let err = &response.errors[0];
        assert_eq!(err.message, "Data access failed");
        assert_eq!(
            err.extensions.as_ref().and_then(|e| e.get("code")),
            Some(&Value::String("DATA_ACCESS_ERROR".to_string()))
        );
    }

    #[tokio::test]
    async fn missing_context_is_an_error_not_a_panic() {
        let response = build_schema().execute("{ hello }").await;
        assert_eq!(response.errors.len(), 1);
    }
}
