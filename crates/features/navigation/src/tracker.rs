use folio_domain::config::{NavigationConfig, SelectorConfig};
use folio_domain::constants::{ACTIVE, FRAGMENT_PREFIX, HREF, ID, NAVBAR_VISIBLE, SCROLLED};
use folio_kernel::context::PageContext;
use folio_kernel::dom::{Document, NodeId, Query};
use tracing::debug;

/// In-page navigation links: `.navbar .nav-link[href^="#"]`.
#[must_use]
pub fn nav_links(document: &Document, selectors: &SelectorConfig) -> Vec<NodeId> {
    document.query_all(
        &Query::new()
            .class(selectors.nav_link_class.as_str())
            .attribute_prefix(HREF, FRAGMENT_PREFIX)
            .within(selectors.navbar_class.as_str()),
    )
}

/// Id of the first `section[id]` whose `[top, top + height)` contains `probe`.
#[must_use]
pub fn section_at(document: &Document, selectors: &SelectorConfig, probe: f64) -> Option<String> {
    document
        .query_all(&Query::new().tag(selectors.section_tag.as_str()).has_attribute(ID))
        .into_iter()
        .filter_map(|node| document.get(node))
        .find(|section| section.rect().contains(probe))
        .and_then(|section| section.id())
        .map(str::to_owned)
}

/// Keeps the navbar styling and the active link in step with the scroll offset.
#[derive(Debug, Clone)]
pub struct NavigationTracker {
    ctx: PageContext,
}

impl NavigationTracker {
    #[must_use]
    pub const fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn settings(&self) -> &NavigationConfig {
        &self.ctx.config.navigation
    }

    /// Marks the navbar visible after the entrance delay. A page without a navbar is left alone.
    pub async fn reveal_navbar(&self) {
        let selectors = &self.ctx.config.selectors;
        if self.ctx.dom.read().by_id(&selectors.navbar_id).is_none() {
            debug!("No navbar, skipping entrance");
            return;
        }

        self.ctx.clock.sleep(self.settings().entrance_delay()).await;

        let mut document = self.ctx.dom.write();
        if let Some(navbar) = document.by_id(&selectors.navbar_id) {
            document.add_class(navbar, NAVBAR_VISIBLE);
            debug!("Navbar entrance complete");
        }
    }

    /// Re-evaluates the navbar after a scroll. Returns the id of the section in view.
    pub fn on_scroll(&self) -> Option<String> {
        let selectors = &self.ctx.config.selectors;
        let settings = self.settings();
        let mut document = self.ctx.dom.write();
        let scroll_y = document.scroll_y();

        if let Some(navbar) = document.by_id(&selectors.navbar_id) {
            document.toggle_class(navbar, SCROLLED, scroll_y >= settings.scrolled_threshold);
        }

        let current = section_at(&document, selectors, scroll_y + settings.active_offset);
        let expected = current.as_deref().map(|id| format!("{FRAGMENT_PREFIX}{id}"));

        let links = nav_links(&document, selectors);
        if mark_active(&mut document, &links, expected.as_deref()) {
            debug!(scroll_y, section = current.as_deref().unwrap_or(""), "Active section changed");
        }
        current
    }
}

/// Leaves `ACTIVE` only on the link pointing at `expected`. Returns `true` if any link changed.
fn mark_active(document: &mut Document, links: &[NodeId], expected: Option<&str>) -> bool {
    let mut changed = false;
    for &link in links {
        let active = expected.is_some() && document.attribute(link, HREF) == expected;
        changed |= document.has_class(link, ACTIVE) != active;
        document.toggle_class(link, ACTIVE, active);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_kernel::testing::{node, portfolio_page};

    fn tracker_at(y: f64) -> NavigationTracker {
        let ctx = PageContext::from_document(portfolio_page());
        ctx.dom.write().set_scroll_y(y);
        NavigationTracker::new(ctx)
    }

    fn active_hrefs(tracker: &NavigationTracker) -> Vec<String> {
        let document = tracker.ctx.dom.read();
        nav_links(&document, &tracker.ctx.config.selectors)
            .into_iter()
            .filter(|&link| document.has_class(link, ACTIVE))
            .filter_map(|link| document.attribute(link, HREF).map(str::to_owned))
            .collect()
    }

    #[tokio::test]
    async fn test_top_of_page_selects_home() {
        let tracker = tracker_at(0.0);
        assert_eq!(tracker.on_scroll().as_deref(), Some("home"));
        assert_eq!(active_hrefs(&tracker), ["#home"]);
    }

    #[tokio::test]
    async fn test_probe_uses_active_offset() {
        // 600 + 120 lands inside #about, which starts at 700.
        let tracker = tracker_at(600.0);
        assert_eq!(tracker.on_scroll().as_deref(), Some("about"));
        assert_eq!(active_hrefs(&tracker), ["#about"]);
    }

    #[tokio::test]
    async fn test_past_last_section_clears_links() {
        let tracker = tracker_at(5000.0);
        assert_eq!(tracker.on_scroll(), None);
        assert!(active_hrefs(&tracker).is_empty());
    }

    #[tokio::test]
    async fn test_scrolled_boundary() {
        let tracker = tracker_at(49.9);
        tracker.on_scroll();
        let navbar = node(&tracker.ctx.dom.read(), "mainNavbar");
        assert!(!tracker.ctx.dom.read().has_class(navbar, SCROLLED));

        tracker.ctx.dom.write().set_scroll_y(50.0);
        tracker.on_scroll();
        assert!(tracker.ctx.dom.read().has_class(navbar, SCROLLED));

        tracker.ctx.dom.write().set_scroll_y(10.0);
        tracker.on_scroll();
        assert!(!tracker.ctx.dom.read().has_class(navbar, SCROLLED));
    }

    #[tokio::test]
    async fn test_active_link_change_is_reported_once() {
        let tracker = tracker_at(0.0);
        let selectors = &tracker.ctx.config.selectors;
        let mut document = tracker.ctx.dom.write();
        let links = nav_links(&document, selectors);

        assert!(mark_active(&mut document, &links, Some("#home")));
        assert!(!mark_active(&mut document, &links, Some("#home")));
        assert!(mark_active(&mut document, &links, Some("#about")));
        assert!(mark_active(&mut document, &links, None));
        assert!(!mark_active(&mut document, &links, None));
    }

    #[tokio::test]
    async fn test_bare_fragment_link_is_never_active() {
        let tracker = tracker_at(0.0);
        tracker.on_scroll();
        assert!(!active_hrefs(&tracker).contains(&"#".to_owned()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_navbar_entrance_after_delay() {
        let tracker = tracker_at(0.0);
        let navbar = node(&tracker.ctx.dom.read(), "mainNavbar");

        let start = tokio::time::Instant::now();
        tracker.reveal_navbar().await;

        assert!(start.elapsed() >= std::time::Duration::from_millis(100));
        assert!(tracker.ctx.dom.read().has_class(navbar, NAVBAR_VISIBLE));

        tracker.reveal_navbar().await;
        let document = tracker.ctx.dom.read();
        let marks = document
            .get(navbar)
            .map(|el| el.classes().iter().filter(|c| *c == NAVBAR_VISIBLE).count());
        assert_eq!(marks, Some(1));
    }
}
