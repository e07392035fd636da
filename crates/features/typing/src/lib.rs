//! # Typing
//!
//! Reveals the hero name and then the hero title one character at a time.
//! The two stages form a chain: the title starts only after the name has been
//! fully emitted and the pause has elapsed.

use folio_domain::config::TypingConfig;
use folio_domain::constants::OPACITY;
use folio_kernel::clock::SharedClock;
use folio_kernel::context::PageContext;
use folio_kernel::dom::Dom;
use std::time::Duration;
use tracing::{debug, info};

/// Writes `text` into the element with `element_id`, one character per `interval`.
///
/// The element is cleared first. The first character appears at once and one
/// more interval elapses after the last. Returns `false` if the element is missing.
pub async fn type_text(
    dom: &Dom,
    clock: &SharedClock,
    element_id: &str,
    text: &str,
    interval: Duration,
) -> bool {
    let Some(node) = dom.read().by_id(element_id) else {
        debug!(element_id, "Typing target missing, skipping");
        return false;
    };
    dom.write().set_text(node, "");

    for c in text.chars() {
        if let Some(element) = dom.write().get_mut(node) {
            element.push_text(c);
        }
        clock.sleep(interval).await;
    }
    true
}

/// The two-stage hero typing sequence.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    ctx: PageContext,
}

impl TypingEffect {
    #[must_use]
    pub const fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn settings(&self) -> &TypingConfig {
        &self.ctx.config.typing
    }

    /// Runs the whole sequence, starting with the post-load delay.
    pub async fn run(&self) {
        self.ctx.clock.sleep(self.settings().start_delay()).await;
        self.type_sequence().await;
    }

    /// Both stages without the initial delay.
    pub async fn type_sequence(&self) {
        let selectors = &self.ctx.config.selectors;
        let settings = self.settings();
        let (dom, clock) = (&self.ctx.dom, &self.ctx.clock);

        type_text(dom, clock, &selectors.typed_name_id, &settings.name_text, settings.name_interval())
            .await;

        clock.sleep(settings.pause()).await;

        let title = dom.read().by_id(&selectors.typed_title_id);
        let Some(title) = title else {
            debug!("Title element missing, skipping second stage");
            return;
        };
        dom.write().set_style(title, OPACITY, "1");

        type_text(dom, clock, &selectors.typed_title_id, &settings.title_text, settings.title_interval())
            .await;

        info!("Typing sequence complete");
    }
}
