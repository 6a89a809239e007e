use axum::http::HeaderMap;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;
use crate::models::user::User;
use crate::store::Store;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,  // expiration time
}

/// Per-request values made available to GraphQL resolvers.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The authenticated caller, if any
    pub user: Option<User>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token lifetime of {0} seconds is out of range")]
    LifetimeOutOfRange(u64),
    #[error("Failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

pub fn issue_token(user_id: &str, secret: &[u8], ttl_seconds: u64) -> Result<String, TokenError> {
    let exp = i64::try_from(ttl_seconds)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
        .and_then(|expires_at| usize::try_from(expires_at.timestamp()).ok())
        .ok_or(TokenError::LifetimeOutOfRange(ttl_seconds))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?)
}

pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;

    tracing::debug!("Token verified successfully for user ID: {}", token_data.claims.sub);
    Ok(token_data.claims)
}

/// Resolve the caller from an `Authorization: Bearer` header.
///
/// A missing header, an invalid or expired token, and a token naming an
/// unknown user all resolve to `None`. Only store failures are errors.
pub async fn resolve_identity(
    headers: &HeaderMap,
    secret: &[u8],
    store: &dyn Store,
) -> Result<Option<User>, DatabaseError> {
    let Some(auth) = headers.typed_get::<Authorization<Bearer>>() else {
        return Ok(None);
    };

    let claims = match verify_token(auth.token(), secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Rejected bearer token: {}", e);
            return Ok(None);
        }
    };

    let user = store.find_user(&claims.sub).await?;
    if user.is_none() {
        tracing::warn!("Token subject {} does not match any user", claims.sub);
    }

    Ok(user)
}
