//! Server configuration loaded from environment variables.
//!
//! Repository selection lives in [`crate::db::RepositoryFactory`]; this
//! covers the listener and the optional bootstrap owner.

use std::env;
use std::net::SocketAddr;

use crate::models::NewUser;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Owner account created at startup if its token is not yet known.
    pub bootstrap_user: Option<NewUser>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bootstrap_user: None,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0)
    /// - `PORT` (optional, default: 8080)
    /// - `BOOTSTRAP_USERNAME`, `BOOTSTRAP_EMAIL`, `BOOTSTRAP_TOKEN` (optional,
    ///   all or none)
    ///
    /// # Errors
    /// Returns an error if `PORT` is not a valid port number or only part of
    /// the bootstrap user is set.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT '{}': {}", raw, e))?,
            Err(_) => DEFAULT_PORT,
        };

        let bootstrap = (
            env::var("BOOTSTRAP_USERNAME").ok(),
            env::var("BOOTSTRAP_EMAIL").ok(),
            env::var("BOOTSTRAP_TOKEN").ok(),
        );
        let bootstrap_user = match bootstrap {
            (Some(username), Some(email), Some(api_token)) => Some(NewUser {
                username,
                email,
                api_token,
            }),
            (None, None, None) => None,
            _ => {
                return Err(
                    "BOOTSTRAP_USERNAME, BOOTSTRAP_EMAIL and BOOTSTRAP_TOKEN must be set together"
                        .to_string(),
                )
            }
        };

        Ok(Self {
            host,
            port,
            bootstrap_user,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}
