use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    DatabaseSettings, LoggingSettings, PaginationSettings, ServerSettings, Settings, StoreBackend,
    TrialSettings,
};

/// Environment variables with this prefix override file values,
/// e.g. `TRIALDESK__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "TRIALDESK";

/// Loads and validates the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at `path`
/// (or an optional `config.toml` in the working directory), then `TRIALDESK__*`
/// environment variables. `DATABASE_URL` fills `database.url` when neither source
/// set it.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings = load_settings(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Same sources as `load_config`, without validation, for callers that apply
/// their own overrides first.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder().add_source(file).add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let mut settings = build(builder)?;
    if settings.database.url.is_none() {
        settings.database.url = std::env::var("DATABASE_URL").ok();
    }
    Ok(settings)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    Ok(settings)
}
