use std::sync::Arc;
use axum::Router;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

#[derive(Clone)]
pub struct AppState {
    pub config: config::Settings,
    pub store: Arc<dyn store::Store>,
    pub schema: graphql::AppSchema,
}

impl AppState {
    pub fn new(config: config::Settings, store: Arc<dyn store::Store>) -> Self {
        let schema = graphql::build_schema(store.clone());
        Self { config, store, schema }
    }
}

/// Create the main Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::graphql::graphql_router(&state.config.server.graphql_path))
        .merge(routes::health::health_router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
