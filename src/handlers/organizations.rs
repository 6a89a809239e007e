use validator::Validate;

use crate::{
    auth::RequestContext,
    error::ApiError,
    models::{
        organization::{CreateOrganizationRequest, NewOrganization, OrganizationWithUsers},
        user::{User, UserRef},
    },
    store::Store,
};

/// Any signed-in user may create an organization.
pub fn authorize(user: Option<&User>) -> bool {
    user.is_some()
}

/// Attach the acting user to the caller's `connect` list.
///
/// The actor is appended, never substituted for what the caller asked for.
/// Duplicate entries are dropped, keeping first occurrence order, so the
/// actor's id appears exactly once.
pub fn normalize(req: CreateOrganizationRequest, actor: &User) -> NewOrganization {
    let actor_ref = UserRef::Id(actor.id.clone());

    let mut connect: Vec<UserRef> = Vec::with_capacity(req.connect.len() + 1);
    for user_ref in req.connect.iter().filter_map(|entry| entry.to_user_ref()) {
        if user_ref != actor_ref && !connect.contains(&user_ref) {
            connect.push(user_ref);
        }
    }
    connect.push(actor_ref);

    NewOrganization {
        name: req.name,
        connect,
        creator_id: actor.id.clone(),
    }
}

/// Create an organization on behalf of the caller in `ctx`.
///
/// Authorization runs first; a denied request is never validated and never
/// reaches the store.
pub async fn create_organization(
    store: &dyn Store,
    ctx: &RequestContext,
    req: CreateOrganizationRequest,
) -> Result<OrganizationWithUsers, ApiError> {
    if !authorize(ctx.user.as_ref()) {
        return Err(ApiError::NotAuthorized);
    }
    let actor = ctx.user.as_ref().ok_or(ApiError::NotAuthorized)?;

    req.validate()?;
    let new_org = normalize(req, actor);

    match store.create_organization(&new_org).await {
        Ok(created) => {
            tracing::info!(
                "User {} created organization {} with {} member(s)",
                actor.id,
                created.organization.id,
                created.users.len()
            );
            Ok(created)
        }
        Err(e) => {
            tracing::error!("Failed to create organization: {}", e);
            Err(ApiError::Persistence(e))
        }
    }
}
