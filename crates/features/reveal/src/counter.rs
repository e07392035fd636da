use crate::state::{RevealError, RevealSet, RevealState};
use folio_domain::config::CounterConfig;
use folio_kernel::context::PageContext;
use folio_kernel::dom::{NodeId, Query};
use tracing::{debug, warn};

/// Reads the leading integer of a `data-count` or `data-width` value.
///
/// Leading whitespace and one sign are accepted; anything after the digits
/// is ignored, so `"85.5"` reads as `85`.
///
/// # Errors
/// Returns [`RevealError::InvalidTarget`] when `raw` does not start with an integer.
pub fn parse_count(raw: &str) -> Result<i64, RevealError> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let rest = unsigned.trim_start_matches(|c: char| c.is_ascii_digit());
    let end = trimmed.len() - rest.len();

    trimmed[..end].parse::<i64>().map_err(|_| RevealError::InvalidTarget {
        message: format!("'{raw}' does not start with an integer").into(),
        context: Some("data-count".into()),
    })
}

/// Values shown on each frame while counting up to `target`.
///
/// Intermediate values are floored; the final frame is exactly `target`.
#[must_use]
pub fn counter_frames(target: i64, step: f64) -> Vec<i64> {
    let goal = target as f64;
    let mut frames = Vec::new();
    let mut current = 0.0_f64;

    loop {
        current += step;
        if current < goal && current.is_finite() && step > 0.0 {
            frames.push(current.floor() as i64);
        } else {
            frames.push(target);
            return frames;
        }
    }
}

/// Counts `.counter[data-count]` elements up from zero once they scroll into view.
#[derive(Debug, Clone)]
pub struct Counters {
    ctx: PageContext,
    reveals: RevealSet,
}

impl Counters {
    /// Starts observing every counter on the page.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        let reveals = RevealSet::new(ctx.config.counters.threshold);
        let selectors = &ctx.config.selectors;
        let counters = ctx.dom.read().query_all(
            &Query::new()
                .class(selectors.counter_class.as_str())
                .has_attribute(selectors.counter_attribute.as_str()),
        );
        for counter in &counters {
            reveals.track(*counter);
        }
        debug!(count = counters.len(), "Observing counters");

        Self { ctx, reveals }
    }

    fn settings(&self) -> &CounterConfig {
        &self.ctx.config.counters
    }

    #[must_use]
    pub const fn reveals(&self) -> &RevealSet {
        &self.reveals
    }

    /// Counters that just became visible. Each is reported once.
    #[must_use]
    pub fn take_visible(&self) -> Vec<NodeId> {
        self.reveals.take_visible(&self.ctx.dom.read())
    }

    /// Runs the count-up of one visible counter to completion.
    ///
    /// # Errors
    /// Returns a [`RevealError`] if `counter` was not reported visible first.
    pub async fn animate(&self, counter: NodeId) -> Result<(), RevealError> {
        let attribute = &self.ctx.config.selectors.counter_attribute;
        let raw = self.ctx.dom.read().attribute(counter, attribute).map(str::to_owned);

        let target = match raw.as_deref().map(parse_count) {
            Some(Ok(target)) => target,
            Some(Err(err)) => {
                warn!(node = counter.index(), "Skipping counter: {err}");
                self.reveals.advance(counter, RevealState::Done)?;
                return Ok(());
            },
            None => {
                self.reveals.advance(counter, RevealState::Done)?;
                return Ok(());
            },
        };

        self.reveals.advance(counter, RevealState::Animating)?;

        let frames = counter_frames(target, self.settings().step_for(target));
        let last = frames.len().saturating_sub(1);
        for (i, value) in frames.into_iter().enumerate() {
            self.ctx.dom.write().set_text(counter, value.to_string());
            if i < last {
                self.ctx.clock.sleep(self.settings().frame()).await;
            }
        }

        self.reveals.advance(counter, RevealState::Done)?;
        debug!(node = counter.index(), target, "Counter finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_for_hundred() {
        let step = CounterConfig::default().step_for(100);
        let frames = counter_frames(100, step);

        assert_eq!(frames.first(), Some(&1));
        assert_eq!(frames.last(), Some(&100));
        assert!(frames.iter().all(|&v| v <= 100));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        // 1500 / 16 = 93.75 increments, so the 94th frame reaches the target.
        assert_eq!(frames.len(), 94);
    }

    #[test]
    fn test_zero_and_negative_targets_snap() {
        assert_eq!(counter_frames(0, 0.0), vec![0]);
        assert_eq!(counter_frames(-5, -0.05), vec![-5]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 42 ").unwrap(), 42);
        assert_eq!(parse_count("4.2").unwrap(), 4);
        assert_eq!(parse_count("85.5%").unwrap(), 85);
        assert_eq!(parse_count("-7px").unwrap(), -7);
        assert_eq!(parse_count("+12").unwrap(), 12);
        assert!(matches!(parse_count("many"), Err(RevealError::InvalidTarget { .. })));
        assert!(parse_count("").is_err());
        assert!(parse_count("-").is_err());
        assert!(parse_count(".5").is_err());
    }
}
