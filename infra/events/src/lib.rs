//! # Event Bus
//!
//! A type-safe, asynchronous event bus that carries page events (scrolls,
//! clicks, blurs, submits) from the host to the behaviors listening for them.
//!
//! ## Overview
//!
//! Events are keyed by their Rust type. Two channel kinds are available:
//! * **Broadcast**: every subscriber sees every event (clicks, submits).
//! * **Watch**: subscribers see only the latest value (the scroll offset).
//!
//! # Example
//!
//! ```rust
//! use folio_events::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct LinkClicked { href: String }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<LinkClicked>()?;
//!     bus.publish(LinkClicked { href: "#about".to_owned() })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.href, "#about");
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
