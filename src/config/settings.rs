use serde::{Deserialize, Serialize};
use secrecy::{Secret, ExposeSecret};
use validator::Validate;
use std::net::IpAddr;
use anyhow::Result;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Settings {
    #[validate]
    pub server: ServerSettings,
    #[validate]
    pub database: DatabaseSettings,
    #[validate]
    pub auth: AuthSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ServerSettings {
    #[validate(custom = "validate_ip_addr")]
    pub bind_address: String,
    #[validate(range(min = 1024, max = 65535))]
    pub port: u16,
    #[validate(custom = "validate_route_path")]
    pub graphql_path: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
#[validate(schema(function = "validate_pool_bounds"))]
pub struct DatabaseSettings {
    pub host: String,
    #[validate(range(min = 1024, max = 65535))]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub database_name: String,
    pub require_ssl: bool,
    pub min_connections: u32,
    #[validate(range(min = 1))]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    // 5 minutes to 1 year
    #[validate(range(min = 300, max = 31_536_000))]
    pub jwt_expiration_seconds: u64,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let config_builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment overrides, i.e. `APP_SERVER__PORT=5001`
            .add_source(config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"))
            .add_source(config::File::with_name("config/local").required(false));

        let settings = config_builder.build()?.try_deserialize()?;

        Ok(settings)
    }

    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

fn validate_ip_addr(addr: &str) -> Result<(), validator::ValidationError> {
    addr.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_ip_address"))
}

fn validate_route_path(path: &str) -> Result<(), validator::ValidationError> {
    if path.starts_with('/') && path.len() > 1 {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_route_path"))
    }
}

fn validate_pool_bounds(db: &DatabaseSettings) -> Result<(), validator::ValidationError> {
    if db.min_connections <= db.max_connections {
        Ok(())
    } else {
        Err(validator::ValidationError::new("min_connections_exceeds_max"))
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        let ssl_mode = if self.require_ssl { "require" } else { "prefer" };
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name,
            ssl_mode
        )
    }
}
