//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CombatEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Effects and outcomes
    Combat,
    /// Round and turn markers
    Turn,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Turn(_) => Topic::Turn,
        }
    }
}

struct Channels {
    combat: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Turn => &self.turn,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; a lagging consumer
/// loses the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
