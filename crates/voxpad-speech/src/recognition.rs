use tokio::sync::mpsc;
use uuid::Uuid;

use voxpad_core::error::Result;
use voxpad_core::types::Locale;

// =============================================================================
// Events
// =============================================================================

/// Terminal outcome of one listening attempt.
///
/// The engine delivers exactly one of these per started attempt. Events are
/// tagged with the id of the session that produced them so that the
/// consumer can discard events from a session that has since been replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The engine produced a final utterance.
    Result {
        session_id: Uuid,
        utterance: String,
    },
    /// The engine ended the attempt without a result (silence or abort).
    Ended { session_id: Uuid },
}

impl RecognitionEvent {
    /// Id of the session that produced this event.
    pub fn session_id(&self) -> Uuid {
        match self {
            RecognitionEvent::Result { session_id, .. }
            | RecognitionEvent::Ended { session_id } => *session_id,
        }
    }
}

/// Sender half of the channel a session delivers its terminal events on.
pub type RecognitionEventSender = mpsc::UnboundedSender<RecognitionEvent>;

// =============================================================================
// Traits
// =============================================================================

/// Factory for recognition sessions.
///
/// Implementations wrap one speech-to-text engine. A session is bound to a
/// single locale for its whole lifetime; selecting a different locale means
/// constructing a new session.
pub trait RecognitionProvider: Send + Sync {
    fn display_name(&self) -> &'static str;

    /// Construct a session bound to `locale`.
    ///
    /// The session reports terminal events tagged with `session_id` on the
    /// `events` channel.
    fn create_session(
        &self,
        locale: Locale,
        session_id: Uuid,
        events: RecognitionEventSender,
    ) -> Result<Box<dyn RecognitionSession>>;
}

/// One bound instance of a recognition engine.
///
/// All methods are non-blocking; completion of a started attempt arrives
/// later as a [`RecognitionEvent`] on the channel the session was
/// constructed with.
pub trait RecognitionSession: Send {
    /// Begin capturing audio for one listening attempt.
    fn start(&mut self) -> Result<()>;

    /// Ask the engine to finish the current attempt early.
    fn stop(&mut self) -> Result<()>;

    /// Discard the current attempt without producing a result.
    fn abort(&mut self) -> Result<()>;
}
