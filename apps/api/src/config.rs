use axum_helpers::JwtConfig;
use core_config::{env_or_default, server::ServerConfig, FromEnv};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
    /// Restrict the profile aggregation to the requesting user's own
    /// orders instead of the whole collection (defaults to off, which
    /// matches the historical behavior).
    pub profile_scope_user_orders: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        let profile_scope_user_orders = matches!(
            env_or_default("PROFILE_SCOPE_USER_ORDERS", "false").as_str(),
            "1" | "true" | "yes"
        );

        Ok(Self {
            mongodb,
            server,
            jwt,
            environment,
            profile_scope_user_orders,
        })
    }
}
