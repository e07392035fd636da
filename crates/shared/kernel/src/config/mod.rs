use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

pub const ENV_PREFIX: &str = "FOLIO";

#[folio_derive::folio_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: an optional file, then `FOLIO__` environment overrides.
///
/// Nested keys use double underscores, e.g. `FOLIO__TYPING__NAME_INTERVAL_MS=50`
/// maps to `typing.name_interval_ms`. Without a file, every value not set in the
/// environment falls back to the target type's serde defaults.
///
/// # Errors
/// Fails if a given file is missing or unreadable, or if the merged values do
/// not deserialize into `T`.
///
/// # Example
/// ```rust
/// use folio_kernel::config::load_config;
/// use folio_kernel::domain::config::FolioConfig;
///
/// let cfg: FolioConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.navigation.active_offset, 120.0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = &path {
        let path: &Path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        info!("No config file given, using defaults and environment");
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
