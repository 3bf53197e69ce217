//! Server configuration

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load the configuration, overriding defaults from the environment
    ///
    /// # Environment Variables
    /// - `SERVER_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `SERVER_PORT`: Port to listen on (default: 5555)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5555)?
            .add_source(Environment::with_prefix("SERVER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
