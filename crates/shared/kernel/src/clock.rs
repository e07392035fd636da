//! Time sources for the timed page sequences.
//!
//! Behaviors never touch tokio time directly; they await a [`Clock`] so the
//! same sequence runs against real time in the shell and virtual time in tests.

use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait Clock: Send + Sync + fmt::Debug {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Completes once `duration` has elapsed on this clock.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

pub type SharedClock = Arc<dyn Clock>;

/// Tokio-backed clock. Under `#[tokio::test(start_paused = true)]` it auto-advances.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: tokio::time::Instant::now() }
    }

    #[must_use]
    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

type SleepHook = Arc<dyn Fn(Duration) + Send + Sync>;

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    waits: Vec<Duration>,
}

/// Virtual clock: every sleep advances time at once and is recorded.
///
/// An optional hook runs after each advance with the new time, which lets a
/// test snapshot the document at precise points of a sequence.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
    hook: Option<SleepHook>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hook(mut self, hook: impl Fn(Duration) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }

    /// Every duration slept on so far, in order.
    #[must_use]
    pub fn waits(&self) -> Vec<Duration> {
        self.state.lock().waits.clone()
    }

    pub fn advance(&self, duration: Duration) {
        let now = {
            let mut state = self.state.lock();
            state.now += duration;
            state.now
        };
        if let Some(hook) = &self.hook {
            hook(now);
        }
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualClock")
            .field("now", &state.now)
            .field("waits", &state.waits.len())
            .finish_non_exhaustive()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.state.lock().waits.push(duration);
        self.advance(duration);
        Box::pin(std::future::ready(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[tokio::test]
    async fn test_manual_clock_advances_and_records() {
        let clock = ManualClock::new();
        clock.sleep(Duration::from_millis(80)).await;
        clock.sleep(Duration::from_millis(60)).await;

        assert_eq!(clock.now(), Duration::from_millis(140));
        assert_eq!(clock.waits(), vec![Duration::from_millis(80), Duration::from_millis(60)]);
    }

    #[tokio::test]
    async fn test_manual_clock_hook_sees_new_time() {
        let seen = Arc::new(AtomicU64::new(0));
        let probe = Arc::clone(&seen);
        let clock = ManualClock::new().with_hook(move |now| {
            probe.store(now.as_millis() as u64, Ordering::SeqCst);
        });

        clock.shared().sleep(Duration::from_millis(400)).await;
        assert_eq!(seen.load(Ordering::SeqCst), 400);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_time() {
        let clock = TokioClock::new();
        clock.sleep(Duration::from_millis(1500)).await;
        assert!(clock.now() >= Duration::from_millis(1500));
    }
}
