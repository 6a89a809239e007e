use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};

use super::user::User;
use crate::auth::RequestContext;
use crate::handlers::organizations;
use crate::models::{
    organization::{CreateOrganizationRequest, OrganizationWithUsers},
    user::UserWhereUnique,
};
use crate::store::Store;

/// An organization
#[derive(SimpleObject, Clone)]
pub struct Organization {
    pub id: ID,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Users linked to the organization
    pub users: Vec<User>,
}

impl From<OrganizationWithUsers> for Organization {
    fn from(created: OrganizationWithUsers) -> Self {
        let org = created.organization;
        Self {
            id: ID(org.id),
            name: org.name,
            created_at: org.created_at,
            updated_at: org.updated_at,
            users: created.users.into_iter().map(User::from).collect(),
        }
    }
}

#[derive(InputObject)]
pub struct OrganizationCreateInput {
    pub name: String,
    pub users: Option<OrganizationUsersInput>,
}

/// Links to existing users
#[derive(InputObject)]
pub struct OrganizationUsersInput {
    #[graphql(default)]
    pub connect: Vec<UserWhereUniqueInput>,
}

/// Identifies one existing user by `id` or by `email`
#[derive(InputObject)]
pub struct UserWhereUniqueInput {
    pub id: Option<ID>,
    pub email: Option<String>,
}

impl From<OrganizationCreateInput> for CreateOrganizationRequest {
    fn from(input: OrganizationCreateInput) -> Self {
        let connect = input
            .users
            .map(|users| users.connect)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| UserWhereUnique {
                id: entry.id.map(|id| id.0),
                email: entry.email,
            })
            .collect();

        Self {
            name: input.name,
            connect,
        }
    }
}

#[derive(Default)]
pub struct OrganizationMutation;

#[Object]
impl OrganizationMutation {
    /// Create an organization. The signed-in user is always linked to it.
    async fn create_organization(
        &self,
        ctx: &Context<'_>,
        data: OrganizationCreateInput,
    ) -> Result<Organization> {
        let store = ctx.data::<Arc<dyn Store>>()?;
        let anonymous = RequestContext::anonymous();
        let request = ctx.data_opt::<RequestContext>().unwrap_or(&anonymous);

        organizations::create_organization(store.as_ref(), request, data.into())
            .await
            .map(Organization::from)
            .map_err(|e| e.extend())
    }
}
