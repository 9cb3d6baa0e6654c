use config::FileFormat;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{InputSettings, LogLevel, OutputSettings, ReportSettings, Settings};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "orderlens.toml";

/// Prefix for environment overrides, e.g. `ORDERLENS__INPUT__DATA_DIRECTORY`.
pub const ENV_PREFIX: &str = "ORDERLENS";

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, then the TOML file, then
/// `ORDERLENS__*` environment variables. With `path` set, the file must exist;
/// otherwise `orderlens.toml` is read only if present.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            config::File::from(path).format(FileFormat::Toml).required(true)
        }
        None => config::File::with_name(DEFAULT_CONFIG_FILE)
            .format(FileFormat::Toml)
            .required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}
