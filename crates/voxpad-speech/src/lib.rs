//! Voxpad Speech crate - Capability seams for the two external speech engines.
//!
//! Provides trait-based abstractions for speech recognition (session
//! construction plus terminal events delivered over a channel) and speech
//! synthesis (fire-and-forget speak with last-call-wins cancellation),
//! along with mock implementations for testing and for composition without
//! real engines.

pub mod capability;
pub mod mock;
pub mod recognition;
pub mod synthesis;

pub use capability::Capability;
pub use mock::{MockRecognitionProvider, MockSynthesisProvider, SynthesisCall};
pub use recognition::{
    RecognitionEvent, RecognitionEventSender, RecognitionProvider, RecognitionSession,
};
pub use synthesis::SynthesisProvider;
