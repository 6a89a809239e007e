use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

use super::user::{User, UserRef, UserWhereUnique};

#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    /// Generated by the store on insert
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An organization together with the users linked to it.
#[derive(Debug, Clone)]
pub struct OrganizationWithUsers {
    pub organization: Organization,
    pub users: Vec<User>,
}

/// Creation payload as supplied by the caller.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization name (1-255 characters)
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Existing users to link besides the creator
    #[validate]
    pub connect: Vec<UserWhereUnique>,
}

/// Write payload handed to the store: the caller's request with the acting
/// user attached to `connect`.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub connect: Vec<UserRef>,
    /// Always present in `connect` as `UserRef::Id`
    pub creator_id: String,
}
