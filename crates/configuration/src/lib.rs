use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, ProviderConfig, ReportConfig, StateConfig, TelegramConfig};

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. It reads an
/// optional `config.toml`, overlays `ROI__`-prefixed environment variables
/// (e.g. `ROI__PROVIDER__TOKEN`), deserializes the result into our
/// strongly-typed `Config` struct, and validates it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // The file is optional so that a fully env-driven deployment works.
        .add_source(config::File::with_name("config").required(false))
        .add_source(
            config::Environment::with_prefix("ROI")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
