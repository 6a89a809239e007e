use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A registered user. Users are provisioned outside this service; here they
/// are only looked up to resolve the caller and linked to organizations.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unique lookup key for an existing user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
    Id(String),
    Email(String),
}

impl UserRef {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserRef::Id(id) => user.id == *id,
            UserRef::Email(email) => user.email == *email,
        }
    }
}

/// A `connect` entry as supplied by the caller. Exactly one of `id` or
/// `email` must be set.
#[derive(Debug, Clone, Default, Validate)]
#[validate(schema(function = "validate_exactly_one_key"))]
pub struct UserWhereUnique {
    pub id: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl UserWhereUnique {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), email: None }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self { id: None, email: Some(email.into()) }
    }

    pub fn to_user_ref(&self) -> Option<UserRef> {
        match (&self.id, &self.email) {
            (Some(id), _) => Some(UserRef::Id(id.clone())),
            (None, Some(email)) => Some(UserRef::Email(email.clone())),
            (None, None) => None,
        }
    }
}

fn validate_exactly_one_key(entry: &UserWhereUnique) -> Result<(), ValidationError> {
    if entry.id.is_some() != entry.email.is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("exactly_one_of_id_or_email"))
    }
}
