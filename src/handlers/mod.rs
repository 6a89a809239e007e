// Handlers module
pub mod graphql;
pub mod health;
pub mod organizations;
