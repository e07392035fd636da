use crate::tracker::nav_links;
use folio_domain::constants::{FRAGMENT_PREFIX, HREF, SHOW};
use folio_kernel::context::PageContext;
use folio_kernel::dom::{NodeId, Query, ScrollBehavior};
use tracing::debug;

/// Turns clicks on in-page links into smooth scrolls.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    ctx: PageContext,
}

impl SmoothScroll {
    #[must_use]
    pub const fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Links this handler listens on.
    #[must_use]
    pub fn links(&self) -> Vec<NodeId> {
        nav_links(&self.ctx.dom.read(), &self.ctx.config.selectors)
    }

    /// Handles a click on `link`. Returns `true` when default navigation was prevented.
    pub fn on_link_click(&self, link: NodeId) -> bool {
        let selectors = &self.ctx.config.selectors;
        let mut document = self.ctx.dom.write();

        if !nav_links(&document, selectors).contains(&link) {
            return false;
        }
        let Some(href) = document.attribute(link, HREF).map(str::to_owned) else {
            return false;
        };
        let Some(id) = href.strip_prefix(FRAGMENT_PREFIX).filter(|id| !id.is_empty()) else {
            return false;
        };
        let Some(target) = document.by_id(id) else {
            debug!(href = %href, "Link target missing, leaving default navigation");
            return false;
        };

        document.scroll_into_view(target, ScrollBehavior::Smooth);

        let collapse = document.query_first(&Query::new().class(selectors.collapse_class.as_str()));
        if let Some(collapse) = collapse.filter(|&c| document.has_class(c, SHOW)) {
            document.remove_class(collapse, SHOW);
            debug!("Closed mobile navigation");
        }

        debug!(href = %href, "Smooth scrolling to section");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_kernel::dom::Element;
    use folio_kernel::testing::{node, portfolio_page};

    fn link_to(ctx: &PageContext, href: &str) -> NodeId {
        let document = ctx.dom.read();
        nav_links(&document, &ctx.config.selectors)
            .into_iter()
            .find(|&link| document.attribute(link, HREF) == Some(href))
            .unwrap()
    }

    #[tokio::test]
    async fn test_click_scrolls_to_target() {
        let ctx = PageContext::from_document(portfolio_page());
        let scroll = SmoothScroll::new(ctx.clone());

        assert!(scroll.on_link_click(link_to(&ctx, "#skills")));

        let document = ctx.dom.read();
        let request = document.scroll_requests()[0];
        assert_eq!(request.target, node(&document, "skills"));
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert!((request.top - 1500.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_bare_fragment_is_ignored() {
        let ctx = PageContext::from_document(portfolio_page());
        let scroll = SmoothScroll::new(ctx.clone());

        assert!(!scroll.on_link_click(link_to(&ctx, "#")));
        assert!(ctx.dom.read().scroll_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_target_keeps_default() {
        let mut page = portfolio_page();
        let nav = page.by_id("mainNavbar").unwrap();
        let ghost = page.append(nav, Element::new("a").with_class("nav-link").with_attribute(HREF, "#blog"));
        let ctx = PageContext::from_document(page);

        assert!(!SmoothScroll::new(ctx.clone()).on_link_click(ghost));
        assert!(ctx.dom.read().scroll_requests().is_empty());
    }

    #[tokio::test]
    async fn test_open_mobile_menu_is_closed() {
        let ctx = PageContext::from_document(portfolio_page());
        let collapse = {
            let mut document = ctx.dom.write();
            let collapse = document.query_first(&Query::new().class("navbar-collapse")).unwrap();
            document.add_class(collapse, SHOW);
            collapse
        };

        assert!(SmoothScroll::new(ctx.clone()).on_link_click(link_to(&ctx, "#about")));
        assert!(!ctx.dom.read().has_class(collapse, SHOW));
    }

    #[tokio::test]
    async fn test_links_outside_navbar_are_not_handled() {
        let mut page = portfolio_page();
        let stray = page.append(page.root(), Element::new("a").with_class("nav-link").with_attribute(HREF, "#about"));
        let ctx = PageContext::from_document(page);

        let scroll = SmoothScroll::new(ctx);
        assert!(!scroll.links().contains(&stray));
        assert!(!scroll.on_link_click(stray));
    }
}
