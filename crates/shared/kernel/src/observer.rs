//! Viewport intersection, evaluated against the document's scroll state.

use crate::dom::{Document, NodeId, Rect};

/// Fraction of `rect` inside the viewport `[scroll_y, scroll_y + viewport_height]`.
///
/// A zero-height box counts as fully visible when its top lies inside the viewport.
#[must_use]
pub fn intersection_ratio(rect: Rect, scroll_y: f64, viewport_height: f64) -> f64 {
    let view_top = scroll_y;
    let view_bottom = scroll_y + viewport_height;

    if rect.height <= 0.0 {
        return if rect.top >= view_top && rect.top <= view_bottom { 1.0 } else { 0.0 };
    }

    let visible = rect.bottom().min(view_bottom) - rect.top.max(view_top);
    (visible / rect.height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Watches a set of elements and reports which of them cross `threshold`.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    targets: Vec<NodeId>,
}

impl VisibilityObserver {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold: threshold.clamp(0.0, 1.0), targets: Vec::new() }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observe(&mut self, target: NodeId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn unobserve(&mut self, target: NodeId) {
        self.targets.retain(|&t| t != target);
    }

    #[must_use]
    pub fn is_observing(&self, target: NodeId) -> bool {
        self.targets.contains(&target)
    }

    #[must_use]
    pub fn observed(&self) -> &[NodeId] {
        &self.targets
    }

    /// One entry per observed element still present in `document`.
    #[must_use]
    pub fn evaluate(&self, document: &Document) -> Vec<IntersectionEntry> {
        self.targets
            .iter()
            .filter_map(|&target| {
                let rect = document.get(target)?.rect();
                let ratio = intersection_ratio(rect, document.scroll_y(), document.viewport_height());
                Some(IntersectionEntry {
                    target,
                    ratio,
                    is_intersecting: ratio > 0.0 && ratio >= self.threshold,
                })
            })
            .collect()
    }

    /// Returns the intersecting targets and stops observing them.
    pub fn take_intersecting(&mut self, document: &Document) -> Vec<NodeId> {
        let hits: Vec<NodeId> = self
            .evaluate(document)
            .into_iter()
            .filter(|entry| entry.is_intersecting)
            .map(|entry| entry.target)
            .collect();
        for &hit in &hits {
            self.unobserve(hit);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_ratio_partial_overlap() {
        let ratio = intersection_ratio(Rect::new(700.0, 200.0), 0.0, 800.0);
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_outside_viewport() {
        assert!(intersection_ratio(Rect::new(900.0, 100.0), 0.0, 800.0).abs() < f64::EPSILON);
        assert!(intersection_ratio(Rect::new(0.0, 100.0), 500.0, 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_zero_height() {
        assert!((intersection_ratio(Rect::new(10.0, 0.0), 0.0, 800.0) - 1.0).abs() < f64::EPSILON);
        assert!(intersection_ratio(Rect::new(900.0, 0.0), 0.0, 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_intersecting_is_one_shot() {
        let mut doc = Document::new(800.0);
        let near = doc.append(doc.root(), Element::new("span").with_rect(100.0, 50.0));
        let far = doc.append(doc.root(), Element::new("span").with_rect(2000.0, 50.0));

        let mut observer = VisibilityObserver::new(0.5);
        observer.observe(near);
        observer.observe(far);

        assert_eq!(observer.take_intersecting(&doc), vec![near]);
        assert!(observer.take_intersecting(&doc).is_empty());
        assert_eq!(observer.observed(), [far]);

        doc.set_scroll_y(1600.0);
        assert_eq!(observer.take_intersecting(&doc), vec![far]);
        assert!(observer.observed().is_empty());
    }

    #[test]
    fn test_threshold_must_be_reached() {
        let mut doc = Document::new(800.0);
        let node = doc.append(doc.root(), Element::new("div").with_rect(720.0, 100.0));
        let mut observer = VisibilityObserver::new(0.5);
        observer.observe(node);

        let entry = observer.evaluate(&doc)[0];
        assert!(entry.ratio > 0.0);
        assert!(!entry.is_intersecting);
    }
}
