//! # Folio
//!
//! Interactive behaviors of a single-page portfolio, driven against an
//! in-memory page document.
//!
//! A [`Portfolio`] builds every behavior enabled in the configuration from
//! one [`PageContext`](kernel::context::PageContext). Hosts either call its
//! `on_*` handlers directly or publish page events on an
//! [`EventBus`](events::EventBus) and let [`spawn_dispatcher`] route them.
//!
//! ## Example
//!
//! ```rust
//! use folio::kernel::clock::ManualClock;
//! use folio::kernel::context::PageContext;
//! use folio::kernel::dom::{Document, Element};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), folio::PortfolioError> {
//! let mut document = Document::new(800.0);
//! let body = document.root();
//! let name = document.append(body, Element::new("h1").with_id("typed-name"));
//!
//! let clock = ManualClock::new();
//! let ctx = PageContext::from_document(document).with_clock(clock.shared());
//! let page = folio::init(ctx)?;
//! page.settle().await;
//! assert_eq!(page.context().dom.text_of(name).as_deref(), Some("Muhammad Kashan"));
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod error;
mod page;
mod tasks;

pub use folio_domain as domain;
pub use folio_events as events;
pub use folio_kernel as kernel;

/// The individual behavior crates.
pub mod features {
    pub use folio_contact as contact;
    pub use folio_navigation as navigation;
    pub use folio_reveal as reveal;
    pub use folio_typing as typing;
}

pub use dispatch::spawn_dispatcher;
pub use error::{PortfolioError, PortfolioErrorExt};
pub use page::Portfolio;
pub use tasks::Tasks;

use folio_kernel::context::PageContext;

/// Builds the page behaviors and runs the load handler.
///
/// Must be called from inside a tokio runtime.
///
/// # Errors
/// See [`Portfolio::new`].
pub fn init(ctx: PageContext) -> Result<Portfolio, PortfolioError> {
    let page = Portfolio::new(ctx)?;
    page.on_load();
    Ok(page)
}
