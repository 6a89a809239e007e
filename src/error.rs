use async_graphql::ErrorExtensions;
use validator::ValidationErrorsKind;

use crate::db::DatabaseError;

/// Errors surfaced to API callers. Every variant is terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authorized")]
    NotAuthorized,
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Detail is logged, never shown to the caller
    #[error("Internal server error")]
    Persistence(#[from] DatabaseError),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotAuthorized => "UNAUTHORIZED",
            ApiError::Validation(_) => "BAD_USER_INPUT",
            ApiError::Persistence(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = errors
            .errors()
            .iter()
            .map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errs) => {
                    let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
                    format!("{} ({})", field, codes.join(", "))
                }
                ValidationErrorsKind::List(entries) => {
                    let indexes: Vec<String> = entries.keys().map(|i| i.to_string()).collect();
                    format!("{} (invalid entries at {})", field, indexes.join(", "))
                }
                ValidationErrorsKind::Struct(_) => format!("{} (invalid)", field),
            })
            .collect::<Vec<_>>();
        fields.sort();
        ApiError::Validation(fields.join("; "))
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}
