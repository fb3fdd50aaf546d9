use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::{Locale, Timestamp};

/// All domain events that can occur in the Voxpad system.
///
/// Events are emitted by the dictation controller and the application shell
/// after state changes, and consumed by diagnostic subscribers over the
/// [`EventBus`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DomainEvent {
    /// A recognition session was (re)built for a locale.
    SessionConfigured {
        session_id: Uuid,
        locale: Locale,
        timestamp: Timestamp,
    },

    /// A listening attempt started on the active session.
    DictationStarted {
        session_id: Uuid,
        locale: Locale,
        timestamp: Timestamp,
    },

    /// The engine produced a final utterance that was appended to the
    /// transcript.
    UtteranceRecognized {
        session_id: Uuid,
        text_length: usize,
        timestamp: Timestamp,
    },

    /// The engine ended a listening attempt without a result.
    DictationEnded {
        session_id: Uuid,
        timestamp: Timestamp,
    },

    /// An in-flight listening attempt was abandoned because the session was
    /// replaced.
    DictationAbandoned {
        session_id: Uuid,
        timestamp: Timestamp,
    },

    /// Text was handed to the synthesis engine.
    SpeechRequested {
        locale: Locale,
        text_length: usize,
        timestamp: Timestamp,
    },

    /// Application started successfully.
    ApplicationStarted {
        version: String,
        timestamp: Timestamp,
    },

    /// Application is shutting down.
    ApplicationShutdown { timestamp: Timestamp },
}

impl DomainEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            DomainEvent::SessionConfigured { timestamp, .. }
            | DomainEvent::DictationStarted { timestamp, .. }
            | DomainEvent::UtteranceRecognized { timestamp, .. }
            | DomainEvent::DictationEnded { timestamp, .. }
            | DomainEvent::DictationAbandoned { timestamp, .. }
            | DomainEvent::SpeechRequested { timestamp, .. }
            | DomainEvent::ApplicationStarted { timestamp, .. }
            | DomainEvent::ApplicationShutdown { timestamp } => *timestamp,
        }
    }

    /// Returns a human-readable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            DomainEvent::SessionConfigured { .. } => "session_configured",
            DomainEvent::DictationStarted { .. } => "dictation_started",
            DomainEvent::UtteranceRecognized { .. } => "utterance_recognized",
            DomainEvent::DictationEnded { .. } => "dictation_ended",
            DomainEvent::DictationAbandoned { .. } => "dictation_abandoned",
            DomainEvent::SpeechRequested { .. } => "speech_requested",
            DomainEvent::ApplicationStarted { .. } => "application_started",
            DomainEvent::ApplicationShutdown { .. } => "application_shutdown",
        }
    }
}

/// Broadcast bus carrying [`DomainEvent`]s to any number of subscribers.
///
/// Cloning shares the underlying channel. Emitting with no live subscriber
/// is a normal condition, not an error.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all current subscribers.
    pub fn emit(&self, event: DomainEvent) {
        // send only fails when there are no subscribers.
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
