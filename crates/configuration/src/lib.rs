use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod credentials;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use credentials::Credentials;
pub use settings::{BrokerConfig, Config, ExecutionConfig, LoggingConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `NEWSTRADE__BROKER__TRADING_URL`.
pub const ENV_PREFIX: &str = "NEWSTRADE";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (optional,
/// a missing file is not an error), then `NEWSTRADE__*` environment variables.
/// The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("symbols.crypto_quotes"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}
