use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

/// An extension trait giving both receiver kinds the same `recv_event` API.
///
/// For `watch::Receiver`, `recv_event` waits for a change before returning the
/// latest value.
pub trait EventReceiverExt<T> {
    /// Receive the next event, returning `None` when the channel is closed.
    fn recv_event(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv_event(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(
                            event = std::any::type_name::<T>(),
                            skipped,
                            "Page event receiver lagged; continuing from the oldest retained event"
                        );
                    }
                    return Some(event);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(event = std::any::type_name::<T>(), skipped = n, "Receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl<T: Event> EventReceiverExt<T> for watch::Receiver<Arc<T>> {
    async fn recv_event(&mut self) -> Option<Arc<T>> {
        match self.changed().await {
            Ok(()) => Some(self.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
