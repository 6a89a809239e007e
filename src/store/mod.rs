use async_trait::async_trait;

use crate::db::DatabaseError;
use crate::models::organization::{NewOrganization, OrganizationWithUsers};
use crate::models::user::User;

/// Persistence backend for users and organizations
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Look up a user by id
    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert an organization and link its users in one transaction.
    ///
    /// Connect entries that match no existing user are skipped. The creator
    /// must end up linked, otherwise nothing is written and
    /// [`DatabaseError::UnknownCreator`] is returned.
    async fn create_organization(
        &self,
        new_org: &NewOrganization,
    ) -> Result<OrganizationWithUsers, DatabaseError>;

    /// Perform a health check on the backend
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub mod postgres;
