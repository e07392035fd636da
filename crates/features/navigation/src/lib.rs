//! # Navigation
//!
//! Two behaviors share the navbar links:
//!
//! * [`NavigationTracker`] slides the navbar in after load, styles it once the
//!   page is scrolled and marks the link of the section in view as active.
//! * [`SmoothScroll`] turns clicks on in-page links into smooth scrolls and
//!   closes the mobile menu.

mod smooth_scroll;
mod tracker;

pub use smooth_scroll::SmoothScroll;
pub use tracker::{NavigationTracker, nav_links, section_at};
