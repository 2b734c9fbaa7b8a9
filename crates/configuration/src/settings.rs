use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub trials: TrialSettings,
    pub pagination: PaginationSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Which store backs the trials and how to reach it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StoreBackend,
    /// PostgreSQL connection string. Falls back to `DATABASE_URL` when unset.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Apply the embedded migrations when the server starts.
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store. Data is lost on restart.
    Memory,
}

/// Business defaults for newly created trials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrialSettings {
    /// Days between creation and the default end date.
    pub trial_length_days: u32,
}

/// Defaults and limits for the paged listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    pub default_size: u32,
    /// Larger requested page sizes are clamped to this value.
    pub max_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `web_server=debug,info`. `RUST_LOG` wins.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
            run_migrations: true,
        }
    }
}

impl Default for TrialSettings {
    fn default() -> Self {
        Self { trial_length_days: 4 }
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 100,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "trialdesk.log".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host is not an IP address: {}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Settings {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.pagination.default_size == 0 || self.pagination.max_size == 0 {
            return Err(ConfigError::ValidationError(
                "pagination sizes must be greater than 0".to_string(),
            ));
        }
        if self.pagination.default_size > self.pagination.max_size {
            return Err(ConfigError::ValidationError(format!(
                "pagination.default_size ({}) exceeds pagination.max_size ({})",
                self.pagination.default_size, self.pagination.max_size
            )));
        }

        if self.database.backend == StoreBackend::Postgres {
            if self.database.max_connections == 0 {
                return Err(ConfigError::ValidationError(
                    "database.max_connections must be greater than 0".to_string(),
                ));
            }
            if self.database.url.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::ValidationError(
                    "database.url (or DATABASE_URL) must be set for the postgres backend"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}
