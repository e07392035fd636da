use crate::clock::{SharedClock, TokioClock};
use crate::dom::{Document, Dom};
use folio_domain::config::{FolioConfig, ScrollAnimationConfig};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point of an optional third-party scroll-animation library.
pub trait ScrollAnimator: Send + Sync {
    fn init(&self, options: &ScrollAnimationConfig);
}

/// Everything a behavior needs, built once per page session.
#[derive(Clone)]
pub struct PageContext {
    pub dom: Dom,
    pub clock: SharedClock,
    pub config: FolioConfig,
    animator: Option<Arc<dyn ScrollAnimator>>,
}

impl PageContext {
    #[must_use]
    pub fn new(dom: Dom, clock: SharedClock, config: FolioConfig) -> Self {
        Self { dom, clock, config, animator: None }
    }

    /// Context over `document` with the default config and tokio time.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        Self::new(Dom::new(document), TokioClock::shared(), FolioConfig::default())
    }

    #[must_use]
    pub fn with_animator(mut self, animator: Arc<dyn ScrollAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn has_animator(&self) -> bool {
        self.animator.is_some()
    }

    /// Hands the configured options to the scroll-animation library, if the page ships one.
    pub fn init_scroll_animations(&self) -> bool {
        let Some(animator) = &self.animator else {
            debug!("No scroll animation library present");
            return false;
        };
        let options = &self.config.scroll_animations;
        info!(
            duration_ms = options.duration_ms,
            easing = %options.easing,
            once = options.once,
            offset = options.offset,
            "Initializing scroll animations"
        );
        animator.init(options);
        true
    }
}

impl fmt::Debug for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContext")
            .field("clock", &self.clock)
            .field("config", &self.config)
            .field("animator", &self.animator.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ScrollAnimationConfig>>);

    impl ScrollAnimator for Recorder {
        fn init(&self, options: &ScrollAnimationConfig) {
            self.0.lock().push(options.clone());
        }
    }

    #[tokio::test]
    async fn test_animator_receives_default_options() {
        let recorder = Arc::new(Recorder::default());
        let ctx = PageContext::from_document(Document::new(800.0)).with_animator(recorder.clone());

        assert!(ctx.init_scroll_animations());
        let calls = recorder.0.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].duration_ms, 700);
        assert_eq!(calls[0].easing, "ease-out-cubic");
        assert!(calls[0].once);
        assert_eq!(calls[0].offset, 80);
    }

    #[tokio::test]
    async fn test_missing_animator_is_skipped() {
        let ctx = PageContext::from_document(Document::new(800.0));
        assert!(!ctx.has_animator());
        assert!(!ctx.init_scroll_animations());
    }
}
