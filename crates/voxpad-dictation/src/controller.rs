//! Dictation session controller.
//!
//! Owns at most one recognition session bound to the current locale and
//! reconciles its terminal events with the transcript and the listening
//! flag. Terminal events arrive as messages on a channel consumed by the
//! hosting event loop, so all mutation happens on one logical thread.

use std::fmt;

use uuid::Uuid;

use voxpad_core::error::Result;
use voxpad_core::events::{DomainEvent, EventBus};
use voxpad_core::types::{Locale, Timestamp, Transcript};
use voxpad_speech::capability::Capability;
use voxpad_speech::recognition::{
    RecognitionEvent, RecognitionEventSender, RecognitionProvider, RecognitionSession,
};
use voxpad_speech::synthesis::SynthesisProvider;

use crate::state::{DictationState, StateMachine};

/// The controller's hold on a recognition session.
///
/// A session is bound to one locale at creation, so locale changes replace
/// the whole slot. The id distinguishes the live session from replaced ones
/// whose terminal events may still be in flight.
pub enum SessionSlot {
    /// No session exists; the recognition capability is unavailable or
    /// `configure` has not run yet.
    NoSession,
    /// A session bound to `locale`, idle or listening.
    Active {
        id: Uuid,
        locale: Locale,
        handle: Box<dyn RecognitionSession>,
    },
}

impl fmt::Debug for SessionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSlot::NoSession => write!(f, "NoSession"),
            SessionSlot::Active { id, locale, .. } => f
                .debug_struct("Active")
                .field("id", id)
                .field("locale", locale)
                .finish_non_exhaustive(),
        }
    }
}

/// Maintains exactly one active-or-idle recognition session bound to the
/// current locale, and reconciles its terminal events with the transcript
/// and the listening flag.
///
/// Absence of either speech capability is a normal condition: the
/// corresponding operation degrades to a logged no-op rather than an error.
pub struct DictationController {
    state: StateMachine,
    transcript: Transcript,
    locale: Locale,
    session: SessionSlot,
    recognition: Capability<Box<dyn RecognitionProvider>>,
    synthesis: Capability<Box<dyn SynthesisProvider>>,
    recognition_tx: RecognitionEventSender,
    events: EventBus,
}

impl fmt::Debug for DictationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictationController")
            .field("state", &self.state)
            .field("locale", &self.locale)
            .field("session", &self.session)
            .field("has_recognition", &self.recognition.is_available())
            .field("has_synthesis", &self.synthesis.is_available())
            .finish_non_exhaustive()
    }
}

impl DictationController {
    /// Create a controller in the Idle state with no session.
    ///
    /// Sessions created later deliver their terminal events on
    /// `recognition_tx`; the hosting event loop feeds the receiving half
    /// back through [`handle_event`](Self::handle_event). Call
    /// [`configure`](Self::configure) to build the initial session.
    pub fn new(
        recognition: Capability<Box<dyn RecognitionProvider>>,
        synthesis: Capability<Box<dyn SynthesisProvider>>,
        recognition_tx: RecognitionEventSender,
        events: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            state: StateMachine::new(),
            transcript: Transcript::new(),
            locale,
            session: SessionSlot::NoSession,
            recognition,
            synthesis,
            recognition_tx,
            events,
        }
    }

    /// (Re)build the recognition session bound to `locale`.
    ///
    /// Any in-flight listening attempt on the previous session is abandoned:
    /// the flag drops to Idle and the old session's terminal event, if it
    /// ever arrives, is discarded by id mismatch. With the recognition
    /// capability unavailable the slot stays empty and the call still
    /// succeeds.
    pub fn configure(&mut self, locale: Locale) -> Result<()> {
        if self.state.current() == DictationState::Listening {
            self.state.transition(DictationState::Idle)?;
            if let SessionSlot::Active { id, .. } = &self.session {
                tracing::debug!(session_id = %id, "In-flight listening attempt abandoned");
                self.events.emit(DomainEvent::DictationAbandoned {
                    session_id: *id,
                    timestamp: Timestamp::now(),
                });
            }
        }

        self.locale = locale;
        match &self.recognition {
            Capability::Available(provider) => {
                let session_id = Uuid::new_v4();
                let handle =
                    provider.create_session(locale, session_id, self.recognition_tx.clone())?;
                tracing::info!(
                    session_id = %session_id,
                    %locale,
                    provider = provider.display_name(),
                    "Recognition session configured"
                );
                self.session = SessionSlot::Active {
                    id: session_id,
                    locale,
                    handle,
                };
                self.events.emit(DomainEvent::SessionConfigured {
                    session_id,
                    locale,
                    timestamp: Timestamp::now(),
                });
            }
            Capability::Unavailable => {
                tracing::warn!("Speech recognition capability unavailable; dictation is disabled");
                self.session = SessionSlot::NoSession;
            }
        }
        Ok(())
    }

    /// Begin one listening attempt on the current session.
    ///
    /// A no-op while already listening and when no session exists (the
    /// recognition capability is absent). Exactly one terminal event per
    /// started attempt later lowers the flag via
    /// [`handle_event`](Self::handle_event).
    pub fn start_listening(&mut self) -> Result<()> {
        if self.state.current() == DictationState::Listening {
            tracing::debug!("Already listening; start ignored");
            return Ok(());
        }

        match &mut self.session {
            SessionSlot::NoSession => {
                tracing::debug!("No recognition session; start ignored");
                Ok(())
            }
            SessionSlot::Active { id, locale, handle } => {
                self.state.transition(DictationState::Listening)?;
                if let Err(e) = handle.start() {
                    self.state.reset();
                    return Err(e);
                }
                tracing::info!(session_id = %id, %locale, "Listening started");
                self.events.emit(DomainEvent::DictationStarted {
                    session_id: *id,
                    locale: *locale,
                    timestamp: Timestamp::now(),
                });
                Ok(())
            }
        }
    }

    /// Reconcile a terminal event from a recognition session.
    ///
    /// Events from replaced sessions and duplicates arriving after the flag
    /// already dropped are discarded, so the flag is lowered exactly once
    /// per listening attempt.
    pub fn handle_event(&mut self, event: RecognitionEvent) -> Result<()> {
        let current_id = match &self.session {
            SessionSlot::Active { id, .. } => Some(*id),
            SessionSlot::NoSession => None,
        };
        if current_id != Some(event.session_id()) {
            tracing::trace!(?event, "Discarding terminal event from a replaced session");
            return Ok(());
        }
        if self.state.current() != DictationState::Listening {
            tracing::trace!(?event, "Discarding terminal event while idle");
            return Ok(());
        }

        match event {
            RecognitionEvent::Result {
                session_id,
                utterance,
            } => {
                self.state.transition(DictationState::Idle)?;
                self.transcript.append_utterance(&utterance);
                tracing::info!(
                    %session_id,
                    chars = utterance.len(),
                    "Utterance appended to transcript"
                );
                self.events.emit(DomainEvent::UtteranceRecognized {
                    session_id,
                    text_length: utterance.len(),
                    timestamp: Timestamp::now(),
                });
            }
            RecognitionEvent::Ended { session_id } => {
                self.state.transition(DictationState::Idle)?;
                tracing::debug!(%session_id, "Listening ended without a result");
                self.events.emit(DomainEvent::DictationEnded {
                    session_id,
                    timestamp: Timestamp::now(),
                });
            }
        }
        Ok(())
    }

    /// Hand `text` to the synthesis engine in the voice for `locale`.
    ///
    /// Empty text is a no-op, as is an absent synthesis capability. At most
    /// one utterance is audible at a time: anything currently playing is
    /// cancelled before the new request (last call wins, never a queue).
    pub fn speak(&self, text: &str, locale: Locale) -> Result<()> {
        if text.is_empty() {
            tracing::debug!("Speak requested with empty text; ignored");
            return Ok(());
        }

        match &self.synthesis {
            Capability::Unavailable => {
                tracing::warn!("Speech synthesis capability unavailable; speak ignored");
                Ok(())
            }
            Capability::Available(provider) => {
                provider.cancel_all()?;
                provider.speak(text, locale)?;
                tracing::info!(%locale, chars = text.len(), "Speech requested");
                self.events.emit(DomainEvent::SpeechRequested {
                    locale,
                    text_length: text.len(),
                    timestamp: Timestamp::now(),
                });
                Ok(())
            }
        }
    }

    /// Speak the current transcript in the current locale.
    pub fn speak_transcript(&self) -> Result<()> {
        self.speak(self.transcript.as_str(), self.locale)
    }

    /// Direct overwrite of the transcript by user input.
    ///
    /// No interaction with the listening flag or the session.
    pub fn edit_transcript(&mut self, new_text: impl Into<String>) {
        self.transcript.overwrite(new_text);
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn current_state(&self) -> DictationState {
        self.state.current()
    }

    pub fn is_listening(&self) -> bool {
        self.state.current() == DictationState::Listening
    }

    /// Whether a recognition session exists, i.e. dictation can start.
    pub fn recognition_available(&self) -> bool {
        matches!(self.session, SessionSlot::Active { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
