use crate::counter::parse_count;
use crate::state::{RevealError, RevealSet, RevealState};
use folio_domain::config::ProgressConfig;
use folio_domain::constants::WIDTH;
use folio_kernel::context::PageContext;
use folio_kernel::dom::{NodeId, Query};
use tracing::{debug, warn};

/// Labels shown on each tick while a percentage climbs to `target` in `steps` ticks.
#[must_use]
pub fn percent_labels(target: i64, steps: u32) -> Vec<String> {
    let goal = target as f64;
    let step = goal / f64::from(steps.max(1));
    let mut labels = Vec::new();
    let mut current = 0.0_f64;

    loop {
        current += step;
        let done = current >= goal || step <= 0.0;
        if done {
            current = goal;
        }
        labels.push(format!("{}%", current.floor() as i64));
        if done {
            return labels;
        }
    }
}

/// Fills `.skill-card .progress-bar[data-width]` bars once they scroll into view.
#[derive(Debug, Clone)]
pub struct ProgressBars {
    ctx: PageContext,
    reveals: RevealSet,
}

impl ProgressBars {
    /// Bars are not observed until [`ProgressBars::arm`] completes.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        let reveals = RevealSet::new(ctx.config.progress.threshold);
        Self { ctx, reveals }
    }

    fn settings(&self) -> &ProgressConfig {
        &self.ctx.config.progress
    }

    #[must_use]
    pub const fn reveals(&self) -> &RevealSet {
        &self.reveals
    }

    #[must_use]
    pub fn bars(&self) -> Vec<NodeId> {
        let selectors = &self.ctx.config.selectors;
        self.ctx.dom.read().query_all(
            &Query::new()
                .class(selectors.progress_bar_class.as_str())
                .has_attribute(selectors.progress_attribute.as_str())
                .within(selectors.skill_card_class.as_str()),
        )
    }

    /// Waits the start delay, then observes every bar. Pages without a skill card are skipped.
    pub async fn arm(&self) -> bool {
        let card_class = self.ctx.config.selectors.skill_card_class.as_str();
        let has_cards =
            self.ctx.dom.read().query_first(&Query::new().class(card_class)).is_some();
        if !has_cards {
            debug!("No skill cards, progress bars stay idle");
            return false;
        }

        self.ctx.clock.sleep(self.settings().start_delay()).await;

        let bars = self.bars();
        for bar in &bars {
            self.reveals.track(*bar);
        }
        debug!(count = bars.len(), "Observing progress bars");
        true
    }

    #[must_use]
    pub fn take_visible(&self) -> Vec<NodeId> {
        self.reveals.take_visible(&self.ctx.dom.read())
    }

    /// Sets the bar width at once, then ticks its label up to the same value.
    ///
    /// # Errors
    /// Returns a [`RevealError`] if `bar` was not reported visible first.
    pub async fn animate(&self, bar: NodeId) -> Result<(), RevealError> {
        let selectors = &self.ctx.config.selectors;
        let (width, label) = {
            let document = self.ctx.dom.read();
            let width = document
                .attribute(bar, &selectors.progress_attribute)
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_owned);
            let label = document
                .closest_with_class(bar, &selectors.skill_card_class)
                .and_then(|card| document.descendant_with_class(card, &selectors.skill_percent_class));
            (width, label)
        };

        let Some(width) = width else {
            return self.reveals.advance(bar, RevealState::Done).map(drop);
        };

        self.reveals.advance(bar, RevealState::Animating)?;
        self.ctx.dom.write().set_style(bar, WIDTH, format!("{width}%"));

        if let Some(label) = label {
            match parse_count(&width) {
                Ok(target) => {
                    for text in percent_labels(target, self.settings().steps) {
                        self.ctx.clock.sleep(self.settings().step_interval()).await;
                        self.ctx.dom.write().set_text(label, text);
                    }
                },
                Err(err) => warn!(node = bar.index(), "Skipping progress label: {err}"),
            }
        }

        self.reveals.advance(bar, RevealState::Done)?;
        debug!(node = bar.index(), width = %width, "Progress bar finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_end_at_target() {
        let labels = percent_labels(85, 30);
        assert_eq!(labels.first().map(String::as_str), Some("2%"));
        assert_eq!(labels.last().map(String::as_str), Some("85%"));
        assert!((30..=31).contains(&labels.len()));
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(percent_labels(0, 30), vec!["0%".to_owned()]);
    }

    #[test]
    fn test_zero_steps_jump_to_target() {
        assert_eq!(percent_labels(40, 0).last().map(String::as_str), Some("40%"));
    }
}
