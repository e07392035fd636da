//! # Runtime
//!
//! A thin orchestration layer for the [Tokio](https://tokio.rs) async runtime.
//!
//! Page behaviors are cooperative: every timed sequence awaits a clock and
//! yields back to the loop. The profiles below pick how that loop is hosted.
//!
//! ## Profiles
//! * **Single Threaded**: one cooperative event loop, mirroring a browser tab.
//! * **Memory Efficient**: a small multi-threaded pool for the shell host.
//! * **High Performance**: a larger pool for replaying many sessions.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[folio_runtime::main(single_threaded)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use folio_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// The default number of worker threads if detection fails.
const DEFAULT_WORKER_THREADS: usize = 4;
/// The default stack size for threads (2 `MiB`).
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
/// Minimum allowed stack size (1 `MiB`).
const MIN_STACK_SIZE: usize = 1024 * 1024;
/// Maximum allowed stack size (16 `MiB`).
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
/// How long an idle thread stays alive.
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(60);
const DEFAULT_THREAD_NAME: &str = "folio-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

/// Detects the number of worker threads from `TOKIO_WORKER_THREADS` or the hardware.
fn get_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= 1024)
            .unwrap_or_else(|| {
                available_parallelism()
                    .map(std::num::NonZero::get)
                    .unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

fn validate_stack_size(stack_size: usize) -> usize {
    stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE)
}

/// Scheduler flavor of the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Every task runs on the thread that calls `block_on`.
    CurrentThread,
    /// Work-stealing pool.
    MultiThread,
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub flavor: Flavor,
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: get_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }
}

impl RuntimeConfig {
    /// Preset matching a browser tab: a single cooperative event loop.
    #[must_use = "Use this configuration to host page behaviors on one thread"]
    pub fn single_threaded() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            worker_threads: 1,
            thread_name: "folio-loop".to_owned(),
            ..Self::default()
        }
    }

    /// Preset for the shell host where memory footprint matters.
    #[must_use = "Use this configuration for low-footprint hosts"]
    pub fn memory_efficient() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: (get_worker_threads() / 2).max(1),
            stack_size: 2 * 1024 * 1024,
            thread_name: "folio-mem".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    /// Preset for replaying many page sessions at once.
    #[must_use = "Use this configuration for high-throughput replays"]
    pub fn high_performance() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: get_worker_threads(),
            stack_size: 4 * 1024 * 1024,
            thread_name: "folio-hp".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, 1024);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = validate_stack_size(size);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    fn normalized(&self) -> Self {
        let mut config = self.clone().with_thread_name(self.thread_name.clone());
        config.worker_threads = config.worker_threads.clamp(1, 1024);
        config.stack_size = validate_stack_size(config.stack_size);
        config
    }
}

/// Creates a new Tokio runtime from a [`RuntimeConfig`].
///
/// Time and I/O drivers are always enabled, since every page behavior
/// awaits timers.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the Tokio runtime cannot be created, typically due to
/// insufficient system resources or OS-level limitations.
///
/// # Examples
///
/// ```rust
/// use folio_runtime::{build_runtime_with_config, RuntimeConfig};
///
/// let runtime = build_runtime_with_config(&RuntimeConfig::single_threaded())?;
/// runtime.block_on(async {});
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    let mut builder = match config.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            builder.worker_threads(config.worker_threads);
            builder
        },
    };
    builder
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all();

    builder.build().map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}

/// Builds the runtime used to host a single page session.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the Tokio runtime cannot be created.
pub fn build_page_runtime() -> Result<Runtime> {
    let config = RuntimeConfig::single_threaded();
    info!(flavor = ?config.flavor, "Initializing page runtime");
    build_runtime_with_config(&config)
}
