//! Delegate that maps callbacks onto a broadcast channel.
//!
//! Lets several consumers (UI, logging, tests) observe one manager even
//! though the manager itself holds a single delegate.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::emitter::RadioDelegate;
use super::RadioEvent;
use crate::metadata::ParsedMetadata;

/// Forwards every callback as a [`RadioEvent`] on a `tokio::sync::broadcast`
/// channel, and optionally to one more delegate.
#[derive(Clone)]
pub struct BroadcastDelegate {
    tx: broadcast::Sender<RadioEvent>,
    /// Optional downstream delegate for direct delivery.
    downstream: Arc<RwLock<Option<Arc<dyn RadioDelegate>>>>,
}

impl BroadcastDelegate {
    /// Creates a new bridge with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 (tokio's broadcast channel requirement).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            downstream: Arc::new(RwLock::new(None)),
        }
    }

    /// Sets a delegate that receives every callback before the broadcast.
    pub fn set_downstream(&self, delegate: Arc<dyn RadioDelegate>) {
        *self.downstream.write() = Some(delegate);
    }

    /// Returns a new receiver for the broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<RadioEvent> {
        self.tx.subscribe()
    }

    fn forward(&self, event: RadioEvent) {
        if let Some(ref delegate) = *self.downstream.read() {
            event.dispatch(delegate.as_ref());
        }
        if let Err(e) = self.tx.send(event) {
            log::trace!("[BroadcastDelegate] No receivers: {}", e);
        }
    }
}

/// Generates a status callback that forwards the matching event.
macro_rules! impl_status {
    ($method:ident, $variant:ident) => {
        fn $method(&self) {
            self.forward(RadioEvent::$variant);
        }
    };
}

impl RadioDelegate for BroadcastDelegate {
    impl_status!(on_loading, Loading);
    impl_status!(on_playing, Playing);
    impl_status!(on_paused, Paused);
    impl_status!(on_stopped, Stopped);

    fn on_metadata_updated(&self, metadata: &ParsedMetadata) {
        self.forward(RadioEvent::MetadataUpdated {
            metadata: metadata.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl RadioDelegate for Counter {
        fn on_stopped(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn forwards_events_to_subscribers_in_order() {
        let bridge = BroadcastDelegate::new(8);
        let mut rx = bridge.subscribe();

        bridge.on_loading();
        bridge.on_playing();
        let mut metadata = ParsedMetadata::new();
        metadata.insert("title".into(), "Song".into());
        bridge.on_metadata_updated(&metadata);

        assert_eq!(rx.try_recv().unwrap(), RadioEvent::Loading);
        assert_eq!(rx.try_recv().unwrap(), RadioEvent::Playing);
        assert_eq!(
            rx.try_recv().unwrap(),
            RadioEvent::MetadataUpdated { metadata }
        );
    }

    #[test]
    fn send_without_receivers_is_harmless() {
        let bridge = BroadcastDelegate::new(4);
        bridge.on_stopped();
    }

    #[test]
    fn downstream_delegate_receives_callbacks() {
        let bridge = BroadcastDelegate::new(4);
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        bridge.set_downstream(counter.clone());

        bridge.on_stopped();
        bridge.on_playing();

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
