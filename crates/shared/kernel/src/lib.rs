//! Kernel shared by every page behavior.
//!
//! It owns the in-memory page document ([`dom`]), viewport intersection
//! ([`observer`]), time ([`clock`]), the per-session [`context::PageContext`],
//! the page event types and config/layout loading.
//!
//! ```rust
//! use folio_kernel::dom::{Document, Element, Query};
//!
//! let mut doc = Document::new(800.0);
//! let nav = doc.append(doc.root(), Element::new("nav").with_class("navbar"));
//! doc.append(nav, Element::new("a").with_class("nav-link").with_attribute("href", "#about"));
//!
//! let links = doc.query_all(&Query::new().class("nav-link").within("navbar"));
//! assert_eq!(links.len(), 1);
//! ```
pub mod clock;
pub mod config;
pub mod context;
pub mod dom;
pub mod error;
pub mod events;
pub mod layout;
pub mod observer;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use folio_domain as domain;
