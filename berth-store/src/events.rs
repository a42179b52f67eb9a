use tokio::sync::broadcast;
use tracing::{debug, info};
use berth_shared::models::events::DomainEvent;

/// In-process fan-out of domain events. Publishing never fails; events sent
/// while nobody is subscribed are only logged.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: DomainEvent) {
        let name = event.name();
        match serde_json::to_string(&event) {
            Ok(payload) => info!(event = name, %payload, "Domain event"),
            Err(e) => info!(event = name, error = %e, "Domain event (unserializable)"),
        }

        if let Err(broadcast::error::SendError(_)) = self.sender.send(event) {
            debug!(event = name, "No subscribers for event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_shared::models::events::TrainSearchEvent;

    fn search_event() -> DomainEvent {
        DomainEvent::TrainSearch(TrainSearchEvent {
            origin: "NDLS".to_string(),
            destination: "MMCT".to_string(),
            travel_date: "2025-05-01".to_string(),
            result_count: 5,
            timestamp: 0,
        })
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(search_event());

        match rx.recv().await.unwrap() {
            DomainEvent::TrainSearch(e) => assert_eq!(e.result_count, 5),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        EventBus::new(0).publish(search_event());
    }
}
