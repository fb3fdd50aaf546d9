//! Mock speech engines for tests and for composition without real engines.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;

use voxpad_core::error::Result;
use voxpad_core::types::Locale;

use crate::recognition::{
    RecognitionEvent, RecognitionEventSender, RecognitionProvider, RecognitionSession,
};
use crate::synthesis::SynthesisProvider;

// =============================================================================
// Recognition
// =============================================================================

/// Mock recognition engine driven by a script of terminal outcomes.
///
/// Each started attempt consumes the next script entry: `Some(text)` ends
/// the attempt with a result, `None` (or an exhausted script) ends it
/// without one. Cloning shares the script and the record of created-session
/// locales, so a clone kept by a test observes sessions created through the
/// original.
#[derive(Clone, Debug, Default)]
pub struct MockRecognitionProvider {
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    delay: Duration,
    created_locales: Arc<Mutex<Vec<Locale>>>,
}

impl MockRecognitionProvider {
    /// Engine with an empty script: every attempt ends without a result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that plays back `outcomes` in order, one per attempt.
    pub fn with_script(outcomes: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            delay: Duration::ZERO,
            created_locales: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deliver terminal events after `delay` instead of synchronously.
    ///
    /// A non-zero delay requires a running tokio runtime.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Locales of every session created so far, in creation order.
    pub fn created_locales(&self) -> Vec<Locale> {
        self.created_locales
            .lock()
            .expect("locale record mutex poisoned")
            .clone()
    }
}

impl RecognitionProvider for MockRecognitionProvider {
    fn display_name(&self) -> &'static str {
        "Mock recognition (scripted)"
    }

    fn create_session(
        &self,
        locale: Locale,
        session_id: Uuid,
        events: RecognitionEventSender,
    ) -> Result<Box<dyn RecognitionSession>> {
        self.created_locales
            .lock()
            .expect("locale record mutex poisoned")
            .push(locale);
        tracing::debug!(%session_id, %locale, "Mock recognition session created");
        Ok(Box::new(MockRecognitionSession {
            session_id,
            script: Arc::clone(&self.script),
            delay: self.delay,
            events,
        }))
    }
}

struct MockRecognitionSession {
    session_id: Uuid,
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    delay: Duration,
    events: RecognitionEventSender,
}

impl RecognitionSession for MockRecognitionSession {
    fn start(&mut self) -> Result<()> {
        let outcome = self
            .script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .flatten();

        let event = match outcome {
            Some(utterance) => RecognitionEvent::Result {
                session_id: self.session_id,
                utterance,
            },
            None => RecognitionEvent::Ended {
                session_id: self.session_id,
            },
        };

        if self.delay.is_zero() {
            let _ = self.events.send(event);
        } else {
            let events = self.events.clone();
            let delay = self.delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = events.send(event);
            });
        }
        Ok(())
    }

    // The scripted attempt always terminates on its own, so stop and abort
    // are accepted without effect.
    fn stop(&mut self) -> Result<()> {
        tracing::debug!(session_id = %self.session_id, "Mock recognition stop");
        Ok(())
    }

    fn abort(&mut self) -> Result<()> {
        tracing::debug!(session_id = %self.session_id, "Mock recognition abort");
        Ok(())
    }
}

// =============================================================================
// Synthesis
// =============================================================================

/// One call observed by [`MockSynthesisProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisCall {
    Cancel,
    Speak { text: String, locale: Locale },
}

/// Mock synthesis engine that records the exact call sequence.
///
/// Cloning shares the record, so a clone kept by a test observes calls made
/// through the boxed copy handed to the controller.
#[derive(Clone, Debug, Default)]
pub struct MockSynthesisProvider {
    calls: Arc<Mutex<Vec<SynthesisCall>>>,
}

impl MockSynthesisProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls.lock().expect("call record mutex poisoned").clone()
    }

    /// The most recent spoken text and locale, if any.
    pub fn last_spoken(&self) -> Option<(String, Locale)> {
        self.calls()
            .into_iter()
            .rev()
            .find_map(|call| match call {
                SynthesisCall::Speak { text, locale } => Some((text, locale)),
                SynthesisCall::Cancel => None,
            })
    }
}

impl SynthesisProvider for MockSynthesisProvider {
    fn display_name(&self) -> &'static str {
        "Mock synthesis (recording)"
    }

    fn speak(&self, text: &str, locale: Locale) -> Result<()> {
        self.calls
            .lock()
            .expect("call record mutex poisoned")
            .push(SynthesisCall::Speak {
                text: text.to_string(),
                locale,
            });
        Ok(())
    }

    fn cancel_all(&self) -> Result<()> {
        self.calls
            .lock()
            .expect("call record mutex poisoned")
            .push(SynthesisCall::Cancel);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_scripted_result_delivered_synchronously() {
        let provider = MockRecognitionProvider::with_script([Some("hello".to_string())]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut session = provider.create_session(Locale::EnUs, id, tx).unwrap();
        session.start().unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            RecognitionEvent::Result {
                session_id: id,
                utterance: "hello".to_string(),
            }
        );
    }

    #[test]
    fn test_exhausted_script_ends_without_result() {
        let provider = MockRecognitionProvider::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut session = provider.create_session(Locale::HiIn, id, tx).unwrap();
        session.start().unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            RecognitionEvent::Ended { session_id: id }
        );
    }

    #[test]
    fn test_none_script_entry_ends_without_result() {
        let provider =
            MockRecognitionProvider::with_script([None, Some("second".to_string())]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut session = provider.create_session(Locale::EnUs, id, tx).unwrap();
        session.start().unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            RecognitionEvent::Ended { session_id: id }
        );

        // The session is reusable; the next attempt consumes the next entry.
        session.start().unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            RecognitionEvent::Result {
                session_id: id,
                utterance: "second".to_string(),
            }
        );
    }

    #[test]
    fn test_created_locales_recorded() {
        let provider = MockRecognitionProvider::new();
        let observer = provider.clone();
        let (tx, _rx) = mpsc::unbounded_channel();

        provider
            .create_session(Locale::EnUs, Uuid::new_v4(), tx.clone())
            .unwrap();
        provider
            .create_session(Locale::GuIn, Uuid::new_v4(), tx)
            .unwrap();

        assert_eq!(observer.created_locales(), vec![Locale::EnUs, Locale::GuIn]);
    }

    #[test]
    fn test_stop_and_abort_are_accepted() {
        let provider = MockRecognitionProvider::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let mut session = provider
            .create_session(Locale::EnUs, Uuid::new_v4(), tx)
            .unwrap();
        session.stop().unwrap();
        session.abort().unwrap();
    }

    #[tokio::test]
    async fn test_delayed_delivery() {
        let provider = MockRecognitionProvider::with_script([Some("later".to_string())])
            .with_delay(Duration::from_millis(10));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut session = provider.create_session(Locale::EnUs, id, tx).unwrap();
        session.start().unwrap();

        // Nothing yet; the event arrives after the simulated latency.
        assert!(rx.try_recv().is_err());
        let event = rx.recv().await.unwrap();
        assert_eq!(event.session_id(), id);
    }

    #[test]
    fn test_synthesis_calls_recorded_in_order() {
        let provider = MockSynthesisProvider::new();

        provider.cancel_all().unwrap();
        provider.speak("first", Locale::EnUs).unwrap();
        provider.cancel_all().unwrap();
        provider.speak("second", Locale::HiIn).unwrap();

        assert_eq!(
            provider.calls(),
            vec![
                SynthesisCall::Cancel,
                SynthesisCall::Speak {
                    text: "first".to_string(),
                    locale: Locale::EnUs,
                },
                SynthesisCall::Cancel,
                SynthesisCall::Speak {
                    text: "second".to_string(),
                    locale: Locale::HiIn,
                },
            ]
        );
    }

    #[test]
    fn test_last_spoken() {
        let provider = MockSynthesisProvider::new();
        assert_eq!(provider.last_spoken(), None);

        provider.speak("a", Locale::EnUs).unwrap();
        provider.speak("b", Locale::EnUs).unwrap();
        provider.cancel_all().unwrap();

        assert_eq!(provider.last_spoken(), Some(("b".to_string(), Locale::EnUs)));
    }

    #[test]
    fn test_synthesis_clone_shares_record() {
        let provider = MockSynthesisProvider::new();
        let observer = provider.clone();

        provider.speak("shared", Locale::GuIn).unwrap();
        assert_eq!(observer.calls().len(), 1);
    }
}
