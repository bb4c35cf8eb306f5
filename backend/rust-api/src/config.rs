use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON array file holding the character sheets
    pub characters_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                characters_file: PathBuf::from("server/data/characters.json"),
            },
            session: SessionConfig {
                ttl_seconds: 3600,
                sweep_interval_seconds: 60,
                cookie_secure: false,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml first, APP_ prefixed ENV wins
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let defaults = Config::default();

        let host = settings
            .get_string("server.host")
            .unwrap_or(defaults.server.host);

        // Plain PORT is honoured for hosting platforms that inject it
        let port = match settings.get_int("server.port") {
            Ok(port) => u16::try_from(port).map_err(|_| {
                config::ConfigError::Message(format!("server.port out of range: {}", port))
            })?,
            Err(_) => match env::var("PORT") {
                Ok(raw) => raw.parse::<u16>().map_err(|e| {
                    config::ConfigError::Message(format!("Invalid PORT '{}': {}", raw, e))
                })?,
                Err(_) => defaults.server.port,
            },
        };

        let characters_file = settings
            .get_string("storage.characters_file")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.characters_file);

        let ttl_seconds = settings
            .get_int("session.ttl_seconds")
            .ok()
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(defaults.session.ttl_seconds);

        let sweep_interval_seconds = settings
            .get_int("session.sweep_interval_seconds")
            .ok()
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(defaults.session.sweep_interval_seconds);

        let cookie_secure = settings
            .get_bool("session.cookie_secure")
            .unwrap_or(defaults.session.cookie_secure);

        if env == "prod" && !cookie_secure {
            tracing::warn!("Session cookie is not marked Secure in prod");
        }

        Ok(Config {
            server: ServerConfig { host, port },
            storage: StorageConfig { characters_file },
            session: SessionConfig {
                ttl_seconds,
                sweep_interval_seconds,
                cookie_secure,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
