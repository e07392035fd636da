use folio_kernel::dom::{Document, NodeId};
use folio_kernel::observer::VisibilityObserver;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle of a one-shot reveal. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealState {
    Pending,
    Visible,
    Animating,
    Done,
}

#[folio_derive::folio_error]
pub enum RevealError {
    #[error("Illegal reveal transition{}: {from:?} -> {to:?}", format_context(.context))]
    InvalidTransition { from: RevealState, to: RevealState, context: Option<Cow<'static, str>> },

    #[error("Element is not tracked{}: {message}", format_context(.context))]
    Untracked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid reveal target{}: {message}", format_context(.context))]
    InvalidTarget { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RevealState {
    /// `Visible -> Done` abandons an element whose target value is unusable.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Visible)
                | (Self::Visible, Self::Animating | Self::Done)
                | (Self::Animating, Self::Done)
        )
    }

    /// # Errors
    /// Returns [`RevealError::InvalidTransition`] for any transition not allowed by
    /// [`RevealState::can_transition`].
    pub fn transition(self, to: Self) -> Result<Self, RevealError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(RevealError::InvalidTransition { from: self, to, context: None })
        }
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Debug)]
struct RevealSetInner {
    observer: VisibilityObserver,
    states: BTreeMap<NodeId, RevealState>,
}

/// Elements waiting for their one-shot reveal, plus the observer watching them.
#[derive(Debug, Clone)]
pub struct RevealSet {
    inner: Arc<Mutex<RevealSetInner>>,
}

impl RevealSet {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RevealSetInner {
                observer: VisibilityObserver::new(threshold),
                states: BTreeMap::new(),
            })),
        }
    }

    /// Starts observing `node`. Elements seen before keep their state.
    pub fn track(&self, node: NodeId) {
        let mut inner = self.inner.lock();
        if inner.states.contains_key(&node) {
            return;
        }
        inner.states.insert(node, RevealState::Pending);
        inner.observer.observe(node);
    }

    /// Moves every pending element that crossed the threshold to `Visible`.
    /// Each element is returned at most once.
    pub fn take_visible(&self, document: &Document) -> Vec<NodeId> {
        let mut inner = self.inner.lock();
        let hits = inner.observer.take_intersecting(document);
        hits.into_iter()
            .filter(|node| match inner.states.get_mut(node) {
                Some(state) if state.can_transition(RevealState::Visible) => {
                    *state = RevealState::Visible;
                    true
                },
                _ => false,
            })
            .collect()
    }

    /// # Errors
    /// Returns [`RevealError::Untracked`] for unknown elements and
    /// [`RevealError::InvalidTransition`] for illegal moves.
    pub fn advance(&self, node: NodeId, to: RevealState) -> Result<RevealState, RevealError> {
        let mut inner = self.inner.lock();
        let state = inner.states.get_mut(&node).ok_or_else(|| RevealError::Untracked {
            message: format!("node {}", node.index()).into(),
            context: None,
        })?;
        *state = state.transition(to)?;
        debug!(node = node.index(), state = ?to, "Reveal state changed");
        Ok(*state)
    }

    #[must_use]
    pub fn state(&self, node: NodeId) -> Option<RevealState> {
        self.inner.lock().states.get(&node).copied()
    }

    #[must_use]
    pub fn tracked(&self) -> Vec<NodeId> {
        self.inner.lock().states.keys().copied().collect()
    }

    /// True once every tracked element reached `Done`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.lock().states.values().all(|s| s.is_done())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_kernel::dom::Element;

    const ALL: [RevealState; 4] =
        [RevealState::Pending, RevealState::Visible, RevealState::Animating, RevealState::Done];

    #[test]
    fn test_forward_path_is_allowed() {
        let state = RevealState::Pending
            .transition(RevealState::Visible)
            .and_then(|s| s.transition(RevealState::Animating))
            .and_then(|s| s.transition(RevealState::Done))
            .unwrap();
        assert!(state.is_done());
    }

    #[test]
    fn test_done_is_terminal() {
        for to in ALL {
            assert!(RevealState::Done.transition(to).is_err(), "Done -> {to:?} must fail");
        }
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let illegal = [
            (RevealState::Pending, RevealState::Animating),
            (RevealState::Pending, RevealState::Done),
            (RevealState::Animating, RevealState::Visible),
            (RevealState::Visible, RevealState::Pending),
            (RevealState::Animating, RevealState::Animating),
        ];
        for (from, to) in illegal {
            let err = from.transition(to).unwrap_err();
            assert!(matches!(err, RevealError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn test_set_reports_each_element_once() {
        let mut doc = Document::new(800.0);
        let near = doc.append(doc.root(), Element::new("span").with_rect(10.0, 20.0));
        let set = RevealSet::new(0.5);
        set.track(near);
        set.track(near);

        assert_eq!(set.take_visible(&doc), vec![near]);
        assert!(set.take_visible(&doc).is_empty());
        assert_eq!(set.state(near), Some(RevealState::Visible));

        set.advance(near, RevealState::Animating).unwrap();
        set.advance(near, RevealState::Done).unwrap();
        assert!(set.is_settled());

        set.track(near);
        assert_eq!(set.state(near), Some(RevealState::Done));
    }

    #[test]
    fn test_untracked_nodes_error() {
        let doc = Document::new(800.0);
        let set = RevealSet::new(0.5);
        let err = set.advance(doc.root(), RevealState::Visible).unwrap_err();
        assert!(matches!(err, RevealError::Untracked { .. }));
    }
}
