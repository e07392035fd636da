use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

/// Default broadcast buffer. A page produces bursts of scroll events at most.
const DEFAULT_CAPACITY: usize = 128;
const MIN_CAPACITY: usize = 1;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Broadcast (fan-out) semantics.
    Broadcast { capacity: usize },
    /// Watch (latest-value) semantics.
    Watch,
}

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

impl ChannelState {
    fn broadcast<T: Event>(&self) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        self.sender
            .downcast_ref::<broadcast::Sender<Arc<T>>>()
            .cloned()
            .ok_or_else(type_mismatch::<T>)
    }

    fn watch<T: Event>(&self) -> Result<watch::Sender<Arc<T>>, EventBusError> {
        self.sender
            .downcast_ref::<watch::Sender<Arc<T>>>()
            .cloned()
            .ok_or_else(type_mismatch::<T>)
    }
}

/// A thread-safe page event bus.
///
/// Channels are indexed by the [`TypeId`] of the event and created lazily on
/// first use. Cloning the bus shares the same channels.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to an event of type `T` using broadcast with default capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a watch channel.
    ///
    /// # Examples
    /// ```rust
    /// use folio_events::{EventBus, EventReceiverExt};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct FormSubmitted(u32);
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), folio_events::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe::<FormSubmitted>()?;
    /// bus.publish(FormSubmitted(1))?;
    /// assert_eq!(rx.recv_event().await.unwrap().0, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to an event of type `T` with a specific broadcast buffer capacity.
    ///
    /// The capacity only matters for the subscription that creates the channel.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a watch channel, or [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        Ok(self.broadcast_sender::<T>(capacity)?.subscribe())
    }

    /// Subscribes to a watch channel (latest-value semantics).
    ///
    /// `initial` seeds the channel if it does not exist yet; otherwise the
    /// current value is kept.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a broadcast channel.
    ///
    /// # Examples
    /// ```rust
    /// use folio_events::EventBus;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct ScrollOffset(f64);
    ///
    /// # fn main() -> Result<(), folio_events::EventBusError> {
    /// let bus = EventBus::new();
    /// let rx = bus.subscribe_watch(ScrollOffset(0.0))?;
    /// bus.publish_watch(ScrollOffset(320.0))?;
    /// assert_eq!(rx.borrow().0, 320.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe_watch<T: Event>(
        &self,
        initial: T,
    ) -> Result<watch::Receiver<Arc<T>>, EventBusError> {
        Ok(self.watch_sender::<T>(Arc::new(initial))?.subscribe())
    }

    /// Publishes an event via broadcast.
    ///
    /// Returns how many subscribers received it; an event published with no
    /// subscribers is dropped and reported as `0`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a watch channel.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance via broadcast without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a watch channel.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;

        Ok(sender.send(event).map_or_else(
            |_| {
                trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
                0
            },
            |count| {
                trace!(event = type_name::<T>(), count, "Event dispatched");
                count
            },
        ))
    }

    /// Replaces the latest value of a watch channel, creating it if missing.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelKindMismatch`] if `T` is already carried
    /// by a broadcast channel.
    pub fn publish_watch<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let event = Arc::new(event);
        self.watch_sender::<T>(event.clone())?.send_replace(event);
        Ok(())
    }

    /// Drops every channel. Receivers observe closure once their buffers drain.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(state) = self.channels.read().get(&id) {
            return match state.kind {
                ChannelKind::Broadcast { capacity: existing } => {
                    if existing != capacity && capacity != DEFAULT_CAPACITY {
                        warn!(
                            event = type_name::<T>(),
                            existing_capacity = existing,
                            requested_capacity = capacity,
                            "Broadcast channel already initialized with a different capacity"
                        );
                    }
                    state.broadcast::<T>()
                },
                ChannelKind::Watch => Err(kind_mismatch::<T>(ChannelKind::Broadcast { capacity }, state.kind)),
            };
        }

        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), capacity, "Initializing broadcast channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { kind: ChannelKind::Broadcast { capacity }, sender: Box::new(tx) }
        });
        match state.kind {
            ChannelKind::Broadcast { .. } => state.broadcast::<T>(),
            ChannelKind::Watch => Err(kind_mismatch::<T>(ChannelKind::Broadcast { capacity }, state.kind)),
        }
    }

    fn watch_sender<T: Event>(&self, initial: Arc<T>) -> Result<watch::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(state) = self.channels.read().get(&id) {
            return match state.kind {
                ChannelKind::Watch => state.watch::<T>(),
                other => Err(kind_mismatch::<T>(ChannelKind::Watch, other)),
            };
        }

        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), "Initializing watch channel");
            let (tx, _) = watch::channel::<Arc<T>>(initial);
            ChannelState { kind: ChannelKind::Watch, sender: Box::new(tx) }
        });
        match state.kind {
            ChannelKind::Watch => state.watch::<T>(),
            other => Err(kind_mismatch::<T>(ChannelKind::Watch, other)),
        }
    }
}

fn type_mismatch<T: Event>() -> EventBusError {
    EventBusError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected event type".into()),
    }
}

fn kind_mismatch<T: Event>(expected: ChannelKind, found: ChannelKind) -> EventBusError {
    EventBusError::ChannelKindMismatch {
        message: format!("Expected {expected:?} but found {found:?} for {}", type_name::<T>())
            .into(),
        context: None,
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity < MIN_CAPACITY {
        return Err(EventBusError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
