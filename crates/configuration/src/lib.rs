use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ExchangeConfig, MonitorParams, Settings, TelegramConfig};

/// Loads the application configuration.
///
/// Values come from an optional `config.toml` file, with environment
/// variables layered on top (`TELEGRAM__TOKEN` maps to `telegram.token`,
/// and so on). Every policy constant has a default, so a bare environment
/// carrying only the Telegram credentials is a complete setup.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // The file is optional; all tunables have defaults.
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default().separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct.
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
