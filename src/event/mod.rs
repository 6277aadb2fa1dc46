//! Connectivity events for the serial session.
//!
//! The application layer observes the link's lifecycle through a broadcast
//! subscription rather than polling the connectivity flag.

use std::sync::Arc;

use tokio::sync::broadcast;

/// Event types that can be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Session established.
    Connected,
    /// Session torn down, either explicitly or by a device disconnect.
    Disconnected,
}

/// A subscription to link events.
pub struct Subscription {
    receiver: broadcast::Receiver<LinkEvent>,
}

impl Subscription {
    /// Receives the next event.
    ///
    /// Returns `None` once the dispatcher is gone. A slow subscriber that
    /// misses events resumes with the next one rather than erroring.
    pub async fn recv(&mut self) -> Option<LinkEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

struct EventDispatcherInner {
    sender: broadcast::Sender<LinkEvent>,
}

/// Dispatches link events to subscribers.
#[derive(Clone)]
pub struct EventDispatcher {
    inner: Arc<EventDispatcherInner>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(EventDispatcherInner { sender }),
        }
    }

    /// Dispatches an event to all subscribers.
    pub fn dispatch(&self, event: LinkEvent) {
        // No receivers is fine
        let _ = self.inner.sender.send(event);
    }

    /// Subscribes to events.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_dispatch() {
        let dispatcher = EventDispatcher::new(16);
        let mut sub = dispatcher.subscribe();

        dispatcher.dispatch(LinkEvent::Connected);

        let event = tokio::time::timeout(std::time::Duration::from_millis(100), sub.recv())
            .await
            .unwrap();

        assert_eq!(event, Some(LinkEvent::Connected));
    }

    #[tokio::test]
    async fn test_dispatch_without_subscribers() {
        let dispatcher = EventDispatcher::new(4);
        // Must not error or panic when nobody is listening
        dispatcher.dispatch(LinkEvent::Disconnected);
    }

    #[tokio::test]
    async fn test_subscription_sees_events_in_order() {
        let dispatcher = EventDispatcher::new(16);
        let mut sub = dispatcher.subscribe();

        dispatcher.dispatch(LinkEvent::Connected);
        dispatcher.dispatch(LinkEvent::Disconnected);

        assert_eq!(sub.recv().await, Some(LinkEvent::Connected));
        assert_eq!(sub.recv().await, Some(LinkEvent::Disconnected));
    }
}
