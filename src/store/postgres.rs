use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::db::DatabaseError;
use crate::models::organization::{NewOrganization, Organization, OrganizationWithUsers};
use crate::models::user::{User, UserRef};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_organization(
        &self,
        new_org: &NewOrganization,
    ) -> Result<OrganizationWithUsers, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (id, name)
             VALUES ($1, $2)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&new_org.name)
        .fetch_one(&mut *tx)
        .await?;

        let mut ids = Vec::new();
        let mut emails = Vec::new();
        for user_ref in &new_org.connect {
            match user_ref {
                UserRef::Id(id) => ids.push(id.clone()),
                UserRef::Email(email) => emails.push(email.clone()),
            }
        }

        sqlx::query(
            "INSERT INTO organization_users (organization_id, user_id)
             SELECT $1, u.id FROM users u
             WHERE u.id = ANY($2) OR u.email = ANY($3)
             ON CONFLICT DO NOTHING",
        )
        .bind(&organization.id)
        .bind(ids)
        .bind(emails)
        .execute(&mut *tx)
        .await?;

        let users = sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.created_at, u.updated_at
             FROM users u
             JOIN organization_users ou ON ou.user_id = u.id
             WHERE ou.organization_id = $1
             ORDER BY u.id",
        )
        .bind(&organization.id)
        .fetch_all(&mut *tx)
        .await?;

        let unmatched = new_org
            .connect
            .iter()
            .filter(|user_ref| !users.iter().any(|u| user_ref.matches(u)))
            .count();
        if unmatched > 0 {
            tracing::debug!(
                "Organization {}: {} of {} connect entries matched no user",
                organization.id,
                unmatched,
                new_org.connect.len()
            );
        }

        if !users.iter().any(|u| u.id == new_org.creator_id) {
            tx.rollback().await?;
            return Err(DatabaseError::UnknownCreator(new_org.creator_id.clone()));
        }

        tx.commit().await?;
        Ok(OrganizationWithUsers { organization, users })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
