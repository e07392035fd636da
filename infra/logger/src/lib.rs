//! # Logger
//!
//! Logging setup shared by every `folio` host.
//! Configures console and rolling-file output on top of `tracing-subscriber`,
//! with non-blocking file I/O and `RUST_LOG`-style filtering.
//!
//! Use [`LoggerBuilder::env_filter`] to set module-directed filters
//! (e.g., `"folio_contact=debug,folio_reveal=info"`), in addition to `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! # use folio_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("folio-shell")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
pub struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is mandatory before [`LoggerBuilder::init`] becomes available;
/// file-only knobs (rotation, retention, JSON) unlock after [`LoggerBuilder::path`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file_state: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the name of the logger; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { name: WithName(name.into()), config: self.config, file_state: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Configures maximum number of log files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Writes file output as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.config.json = true;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `folio_navigation=debug`).
    ///
    /// Invalid filters make [`LoggerBuilder::init`] return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Sets the directory for rolling log files.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, file_state: PhantomData }
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. Keep it alive for the lifetime of the host so the
    /// non-blocking file writer can flush.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;
        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();
        if self.config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &self.config.path {
            Some(path) => {
                let (file, guard) = file_layer(&self.config, &self.name.0, path)?;
                layers.push(file);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

fn file_layer<S>(
    config: &LoggerConfig,
    name: &str,
    path: &Path,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create path: {}", path.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(path)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = layer().with_writer(writer).with_ansi(false);
    let boxed = if config.json { file.json().boxed() } else { file.boxed() };

    Ok((boxed, guard))
}

/// A handle to the initialized logging system.
///
/// Holds the background writer guard. Drop it only when the host shuts down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// # Example
    ///
    /// ```rust
    /// use folio_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder()
    ///     .name("folio-shell")
    ///     .level(LevelFilter::DEBUG)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName, file_state: PhantomData }
    }

    /// Returns a reference to the underlying worker guard, if file output is on.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_logger_builder_initial_state() {
        let builder = Logger::builder().name("folio-test").env_filter("folio_contact=debug");
        assert!(builder.config.console);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert_eq!(builder.config.env_filter.as_deref(), Some("folio_contact=debug"));
        assert!(builder.config.path.is_none());
    }

    #[test]
    #[serial]
    fn test_file_options_follow_path() {
        let builder = Logger::builder()
            .name("folio-test")
            .level(LevelFilter::DEBUG)
            .path("logs")
            .max_files(3)
            .rotation(Rotation::HOURLY)
            .json();

        assert_eq!(builder.config.level, LevelFilter::DEBUG);
        assert_eq!(builder.config.max_files, 3);
        assert!(builder.config.json);
        assert_eq!(builder.config.path.as_deref(), Some(Path::new("logs")));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = validate_config(&LoggerConfig::default(), "  ").expect_err("blank name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_env_filter_is_rejected() {
        let config =
            LoggerConfig { env_filter: Some("folio=loud".to_owned()), ..LoggerConfig::default() };
        let err = build_env_filter(&config).expect_err("malformed filter");
        assert!(err.to_string().contains("Invalid env filter"));
    }
}
