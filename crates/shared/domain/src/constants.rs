//! Marker classes, attribute names and inline style properties the behaviors
//! read or write. Element ids and lookup classes live in
//! [`crate::config::SelectorConfig`] because a page may rename them.

// Behavior names, as used in configuration files.
pub const NAVIGATION: &str = "navigation";
pub const SMOOTH_SCROLL: &str = "smooth_scroll";
pub const TYPING: &str = "typing";
pub const COUNTERS: &str = "counters";
pub const PROGRESS: &str = "progress";
pub const CONTACT: &str = "contact";
pub const SCROLL_ANIMATIONS: &str = "scroll_animations";

// Marker classes.
pub const NAVBAR_VISIBLE: &str = "navbar-visible";
pub const SCROLLED: &str = "scrolled";
pub const ACTIVE: &str = "active";
pub const SHOW: &str = "show";
pub const IS_VALID: &str = "is-valid";
pub const IS_INVALID: &str = "is-invalid";
pub const SENDING: &str = "sending";
pub const FORM_STATUS: &str = "form-status";

// Attributes.
pub const HREF: &str = "href";
pub const ID: &str = "id";
pub const ARIA_LIVE: &str = "aria-live";
pub const ARIA_LIVE_POLITE: &str = "polite";

// Inline style properties.
pub const WIDTH: &str = "width";
pub const OPACITY: &str = "opacity";

/// Prefix of in-page links.
pub const FRAGMENT_PREFIX: &str = "#";
