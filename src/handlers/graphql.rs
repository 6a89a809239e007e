use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use secrecy::ExposeSecret;

use crate::{auth, auth::RequestContext, AppState};

/// Execute a GraphQL request with the caller resolved from the bearer token
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let identity = auth::resolve_identity(
        &headers,
        state.config.auth.jwt_secret.expose_secret().as_bytes(),
        state.store.as_ref(),
    )
    .await;

    let request_ctx = match identity {
        Ok(Some(user)) => RequestContext::authenticated(user),
        Ok(None) => RequestContext::anonymous(),
        Err(e) => {
            tracing::error!("Failed to resolve request identity: {}", e);
            let error = async_graphql::ServerError::new("Internal server error", None);
            return async_graphql::Response::from_errors(vec![error]).into();
        }
    };

    state
        .schema
        .execute(req.into_inner().data(request_ctx))
        .await
        .into()
}

/// GraphiQL page for exploring the API
pub async fn graphiql(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.config.server.graphql_path)
            .finish(),
    )
}
