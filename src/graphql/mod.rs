//! GraphQL schema
//!
//! Resolvers stay thin: they unpack the per-request [`RequestContext`] and
//! delegate to the handlers in [`crate::handlers`].
//!
//! [`RequestContext`]: crate::auth::RequestContext

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::store::Store;

pub mod organization;
pub mod user;

pub use organization::OrganizationMutation;
pub use user::UserQuery;

#[derive(MergedObject, Default)]
pub struct Query(UserQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(OrganizationMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(store: Arc<dyn Store>) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(store)
        .finish()
}

/// Schema definition language for the API, as served at the GraphQL endpoint
pub fn sdl() -> String {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .finish()
        .sdl()
}
