use async_graphql::{Context, Object, SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::auth::RequestContext;
use crate::models;

/// A registered user
#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::user::User> for User {
    fn from(u: models::user::User) -> Self {
        Self {
            id: ID(u.id),
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The signed-in user, or null for anonymous requests
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.data_opt::<RequestContext>()
            .and_then(|request| request.user.clone())
            .map(User::from)
    }
}
