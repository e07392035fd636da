use crate::error::{PortfolioError, PortfolioErrorExt};
use crate::page::Portfolio;
use folio_events::{EventBus, EventReceiverExt};
use folio_kernel::events::{FieldBlurred, FormSubmitted, LinkClicked, Loaded, ScrollOffset, Scrolled};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Routes page events published on `bus` to `page` until the bus shuts down.
///
/// Events of one type are handled in publish order; events of different
/// types carry no relative ordering. After each scroll the new offset is
/// published on the [`ScrollOffset`] watch channel.
///
/// # Errors
/// Returns [`PortfolioError::Events`] if one of the page event types is
/// already carried by a channel of the wrong kind.
pub fn spawn_dispatcher(
    page: Arc<Portfolio>,
    bus: &EventBus,
) -> Result<JoinHandle<()>, PortfolioError> {
    let mut loaded = bus.subscribe::<Loaded>().context("Subscribing to Loaded")?;
    let mut scrolled = bus.subscribe::<Scrolled>().context("Subscribing to Scrolled")?;
    let mut clicks = bus.subscribe::<LinkClicked>().context("Subscribing to LinkClicked")?;
    let mut blurs = bus.subscribe::<FieldBlurred>().context("Subscribing to FieldBlurred")?;
    let mut submits = bus.subscribe::<FormSubmitted>().context("Subscribing to FormSubmitted")?;
    let _offset = bus.subscribe_watch(ScrollOffset::default()).context("Creating ScrollOffset")?;

    let bus = bus.clone();
    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                event = loaded.recv_event() => match event {
                    Some(_) => page.on_load(),
                    None => break,
                },
                event = scrolled.recv_event() => match event {
                    Some(event) => {
                        page.on_scroll(event.y);
                        let y = page.context().dom.read().scroll_y();
                        if let Err(err) = bus.publish_watch(ScrollOffset(y)) {
                            warn!("Scroll offset not published: {err}");
                        }
                    },
                    None => break,
                },
                event = clicks.recv_event() => match event {
                    Some(event) => {
                        let handled = page.on_link_click(event.node);
                        debug!(node = event.node.index(), handled, "Link clicked");
                    },
                    None => break,
                },
                event = blurs.recv_event() => match event {
                    Some(event) => {
                        let valid = page.on_blur(event.node);
                        debug!(node = event.node.index(), ?valid, "Field blurred");
                    },
                    None => break,
                },
                event = submits.recv_event() => match event {
                    Some(event) => {
                        let intercepted = page.on_submit(event.node);
                        debug!(node = event.node.index(), intercepted, "Form submitted");
                    },
                    None => break,
                },
            }
        }
        info!("Page event bus closed; dispatcher stopped");
    }))
}
