//! Configuration for Users API

use core_config::{app_info, env_optional, server::ServerConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Comma-separated allowed CORS origins; any origin when unset
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let cors_origin = env_optional("CORS_ALLOWED_ORIGIN");

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            cors_origin,
        })
    }
}
