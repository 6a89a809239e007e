use crate::handlers::graphql;
use crate::AppState;
use axum::{routing::get, Router};

pub fn graphql_router(path: &str) -> Router<AppState> {
    Router::new().route(path, get(graphql::graphiql).post(graphql::graphql_handler))
}
