#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use secrecy::Secret;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use orgraph::config::settings::{AuthSettings, DatabaseSettings, ServerSettings, Settings};
use orgraph::db::DatabaseError;
use orgraph::models::organization::{NewOrganization, Organization, OrganizationWithUsers};
use orgraph::models::user::User;
use orgraph::store::Store;
use orgraph::AppState;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

#[derive(Default, Clone)]
pub struct MockStore {
    users: Arc<Mutex<Vec<User>>>,
    organizations: Arc<Mutex<Vec<OrganizationWithUsers>>>,
    fail: Arc<AtomicBool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: &str, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: id.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Make every subsequent store call fail as if the database were down
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn organizations(&self) -> Vec<OrganizationWithUsers> {
        self.organizations.lock().unwrap().clone()
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DatabaseError::Other(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Store for MockStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        self.check_available()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_organization(
        &self,
        new_org: &NewOrganization,
    ) -> Result<OrganizationWithUsers, DatabaseError> {
        self.check_available()?;

        let mut linked: Vec<User> = {
            let users = self.users.lock().unwrap();
            users
                .iter()
                .filter(|u| new_org.connect.iter().any(|r| r.matches(u)))
                .cloned()
                .collect()
        };
        linked.sort_by(|a, b| a.id.cmp(&b.id));

        if !linked.iter().any(|u| u.id == new_org.creator_id) {
            return Err(DatabaseError::UnknownCreator(new_org.creator_id.clone()));
        }

        let now = Utc::now();
        let created = OrganizationWithUsers {
            organization: Organization {
                id: Uuid::new_v4().to_string(),
                name: new_org.name.clone(),
                created_at: now,
                updated_at: now,
            },
            users: linked,
        };
        self.organizations.lock().unwrap().push(created.clone());

        Ok(created)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            bind_address: "127.0.0.1".to_string(),
            port: 4000,
            graphql_path: "/graphql".to_string(),
        },
        database: DatabaseSettings {
            host: "localhost".to_string(),
            port: 5432,
            username: "test".to_string(),
            password: Secret::new("test".to_string()),
            database_name: "test".to_string(),
            require_ssl: false,
            min_connections: 1,
            max_connections: 5,
        },
        auth: AuthSettings {
            jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            jwt_expiration_seconds: 3600,
        },
    }
}

pub fn test_state(store: &MockStore) -> AppState {
    AppState::new(test_settings(), Arc::new(store.clone()))
}

pub fn token_for(user_id: &str) -> String {
    orgraph::auth::issue_token(user_id, TEST_JWT_SECRET.as_bytes(), 3600).unwrap()
}
